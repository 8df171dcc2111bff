//! Analyze command - score every column of a position

use anyhow::{bail, Context, Result};
use clap::Args;

use fourline_core::{detect_draw, has_four, AlphaBetaAI, Board, Difficulty, Player, SearchReport, COLS};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Moves played so far as 1-based column digits, e.g. 4453
    #[arg(long, default_value = "")]
    pub moves: String,

    /// Search depth tier
    #[arg(long, default_value = "medium")]
    pub difficulty: Difficulty,

    /// Output the search report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let board = Board::from_move_string(&args.moves)
        .with_context(|| format!("Invalid move string '{}'", args.moves))?;
    let report = analyze(&board, args.difficulty)?;

    if args.json {
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", text);
    } else {
        print_report(&board, &report);
    }
    Ok(())
}

fn analyze(board: &Board, difficulty: Difficulty) -> Result<SearchReport> {
    if has_four(board, Player::One) || has_four(board, Player::Two) {
        bail!("The game is already decided");
    }
    if detect_draw(board) {
        bail!("The board is full");
    }

    let mut ai = AlphaBetaAI::for_difficulty(board.side_to_move(), difficulty);
    Ok(ai.analyze(board))
}

fn print_report(board: &Board, report: &SearchReport) {
    println!("{}\n", board);
    println!(
        "{} to move, depth {} ({} nodes, {} cutoffs)",
        report.player.symbol(),
        report.depth,
        report.stats.nodes,
        report.stats.cutoffs
    );
    for col in 0..COLS {
        let score = match report.column_scores[col] {
            Some(score) => score.to_string(),
            None => "full".to_string(),
        };
        let marker = if col == report.column { " <- best" } else { "" };
        println!("  column {}: {}{}", col + 1, score, marker);
    }
}
