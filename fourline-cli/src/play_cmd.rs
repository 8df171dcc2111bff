//! Play command - interactive game in the terminal
//!
//! Input is one command per line: a column 1-7, `n` (new game),
//! `r` (reset scores), `h` (help) or `q` (quit).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::Result;
use clap::Args;

use fourline_core::{Board, Difficulty, GameConfig, Outcome, Player, Session, COLS};

#[derive(Args)]
pub struct PlayArgs {
    /// JSON game config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// AI difficulty: easy, medium or hard (overrides the config file)
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Two humans take turns; no AI
    #[arg(long)]
    pub two_player: bool,

    /// AI thinking delay in milliseconds (overrides the config file)
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Column(usize),
    NewGame,
    ResetScores,
    Help,
    Quit,
    Unknown(String),
}

pub fn run(args: PlayArgs) -> Result<()> {
    let config = build_config(&args)?;
    tracing::info!(
        "Starting game: ai={} difficulty={}",
        config.ai_enabled,
        config.difficulty
    );

    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    print_help();
    render(&session);

    loop {
        if session.is_ai_turn() {
            run_ai_turn(&mut session)?;
            render(&session);
            continue;
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };

        match parse_command(&line?) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::NewGame => {
                session.reset_game();
                render(&session);
            }
            Command::ResetScores => {
                session.reset_scores();
                render(&session);
            }
            Command::Column(col) => match session.play(col) {
                Ok(_) => render(&session),
                Err(err) => println!("{}", err),
            },
            Command::Unknown(input) => println!("Unknown command '{}' (h for help)", input),
        }
    }

    Ok(())
}

/// Config file first, then command-line overrides
fn build_config(args: &PlayArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(delay) = args.delay_ms {
        config.think_delay_ms = delay;
    }
    if args.two_player {
        config.ai_enabled = false;
    }
    Ok(config)
}

/// Compute the AI's reply after the thinking delay. Input is not read meanwhile.
fn run_ai_turn(session: &mut Session) -> Result<()> {
    let Some(request) = session.request_ai_move() else {
        return Ok(());
    };
    println!("AI thinking...");

    thread::sleep(request.think_delay);
    let reply = request.compute();

    if session.apply_ai_reply(reply)?.is_some() {
        if let Some(&col) = session.history().last() {
            println!("AI plays column {}", col + 1);
        }
    }
    Ok(())
}

fn parse_command(input: &str) -> Command {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Command::Quit,
        "n" | "new" => Command::NewGame,
        "r" | "reset" => Command::ResetScores,
        "h" | "help" | "?" => Command::Help,
        other => match other.parse::<usize>() {
            Ok(n) if (1..=COLS).contains(&n) => Command::Column(n - 1),
            _ => Command::Unknown(input.to_string()),
        },
    }
}

fn print_help() {
    println!("Drop a piece with a column number 1-{}.", COLS);
    println!("n = new game, r = reset scores, h = help, q = quit");
}

fn render(session: &Session) {
    println!();
    println!("{}", render_board(session.board()));

    let scores = session.scores();
    let opponent = if session.ai_player().is_some() { "AI" } else { "Player 2" };
    println!(
        "X Player 1: {}   O {}: {}",
        scores.player_one, opponent, scores.player_two
    );

    match session.outcome() {
        Outcome::Ongoing => println!("To move: {}", describe(session, session.current_player())),
        Outcome::Draw => println!("It's a draw! (n for a new game)"),
        outcome => {
            if let Some(winner) = outcome.winner() {
                println!("{} wins! (n for a new game)", describe(session, winner));
            }
        }
    }
}

fn describe(session: &Session, player: Player) -> String {
    if session.ai_player() == Some(player) {
        format!("{} (AI)", player.symbol())
    } else {
        match player {
            Player::One => "X (Player 1)".to_string(),
            Player::Two => "O (Player 2)".to_string(),
        }
    }
}

/// Board with a column header, cells separated by spaces
fn render_board(board: &Board) -> String {
    let header: Vec<String> = (1..=COLS).map(|c| c.to_string()).collect();
    let mut out = header.join(" ");
    for line in board.to_string().lines() {
        out.push('\n');
        let cells: Vec<String> = line.chars().map(String::from).collect();
        out.push_str(&cells.join(" "));
    }
    out
}
