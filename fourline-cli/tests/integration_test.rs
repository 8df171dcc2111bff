//! Integration tests for FOURLINE
//!
//! Tests the full stack: engine rules, AI selection, sessions and arena matches

use fourline_arena::{play_match, ArenaConfig};
use fourline_core::{
    apply_move, detect_draw, detect_win, select_move, AlphaBetaAI, Board, Difficulty,
    GameConfig, Outcome, Player, Session, SessionError, COLS,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Full board without any line of four
fn drawn_board() -> Board {
    Board::from_rows(&[
        "XXOOXXO",
        "OOXXOOX",
        "XXOOXXO",
        "OOXXOOX",
        "XXOOXXO",
        "OOXXOOX",
    ])
    .unwrap()
}

// ============================================================================
// ENGINE SCENARIOS
// ============================================================================

#[test]
fn test_full_board_without_line_is_draw() {
    let board = drawn_board();
    assert!(detect_draw(&board));
    assert!(!detect_win(&board, 0, 6, Player::Two));
    assert_eq!(board.legal_columns().count(), 0);
}

#[test]
fn test_vertical_threat_is_blocked() {
    // X stacks three in column 3; O must cap it
    let board = Board::from_move_string("41424").unwrap();
    assert_eq!(board.side_to_move(), Player::Two);
    assert_eq!(select_move(&board, Difficulty::Medium), 3);
    assert_eq!(select_move(&board, Difficulty::Hard), 3);
}

#[test]
fn test_diagonal_win_is_taken() {
    // X holds three on the rising diagonal from the bottom-left corner
    let board = Board::from_rows(&[
        ".......",
        ".......",
        ".......",
        "..XO...",
        ".XOO...",
        "XOOX..X",
    ])
    .unwrap();
    assert_eq!(board.side_to_move(), Player::One);
    for difficulty in Difficulty::ALL {
        assert_eq!(select_move(&board, difficulty), 3, "{}", difficulty);
    }
}

// ============================================================================
// SESSION TESTS
// ============================================================================

#[test]
fn test_session_against_ai_runs_to_completion() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut session = Session::new(GameConfig::vs_ai(Difficulty::Medium).with_think_delay(0));

    while !session.outcome().is_over() {
        if let Some(request) = session.request_ai_move() {
            let reply = request.compute();
            assert!(session.apply_ai_reply(reply).unwrap().is_some());
            continue;
        }
        let legal: Vec<usize> = session.board().legal_columns().collect();
        let col = *legal.choose(&mut rng).unwrap();
        session.play(col).unwrap();
    }

    let scores = session.scores();
    match session.outcome() {
        Outcome::PlayerOneWins => assert_eq!(scores.player_one, 1),
        Outcome::PlayerTwoWins => assert_eq!(scores.player_two, 1),
        Outcome::Draw => assert_eq!(scores.player_one + scores.player_two, 0),
        Outcome::Ongoing => unreachable!(),
    }
    assert_eq!(session.play(0), Err(SessionError::GameOver));
}

#[test]
fn test_medium_ai_beats_random_player() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut ai_wins = 0;

    for _ in 0..4 {
        let mut session = Session::new(GameConfig::vs_ai(Difficulty::Medium).with_think_delay(0));
        while !session.outcome().is_over() {
            match session.request_ai_move() {
                Some(request) => {
                    session.apply_ai_reply(request.compute()).unwrap();
                }
                None => {
                    let legal: Vec<usize> = session.board().legal_columns().collect();
                    session.play(*legal.choose(&mut rng).unwrap()).unwrap();
                }
            }
        }
        if session.outcome() == Outcome::PlayerTwoWins {
            ai_wins += 1;
        }
    }

    assert!(ai_wins >= 3, "medium AI won only {} of 4 games against random play", ai_wins);
}

#[test]
fn test_stale_reply_after_reconfigure() {
    let mut session = Session::new(GameConfig::vs_ai(Difficulty::Easy).with_think_delay(0));
    session.play(3).unwrap();
    let request = session.request_ai_move().unwrap();

    session.set_config(GameConfig::vs_ai(Difficulty::Hard));
    assert_eq!(session.apply_ai_reply(request.compute()), Ok(None));
    assert_eq!(session.board().piece_count(), 0);
}

// ============================================================================
// ARENA TESTS
// ============================================================================

#[test]
fn test_arena_match_is_reproducible() {
    let config = ArenaConfig::default().with_games(2).with_openings(2).with_seed(17);
    let a = play_match(Difficulty::Easy, Difficulty::Medium, &config);
    let b = play_match(Difficulty::Easy, Difficulty::Medium, &config);

    assert_eq!(a.games, b.games);
    assert_eq!(a.games_played, 2);
    for game in &a.games {
        assert!(game.outcome.is_over());
        let replay = Board::from_moves(&game.moves).unwrap();
        assert_eq!(replay.piece_count(), game.moves.len());
    }
}

// ============================================================================
// SEARCH PERFORMANCE
// ============================================================================

#[test]
fn test_search_depths_complete() {
    let board = Board::from_move_string("4").unwrap();

    let start = Instant::now();
    let mut easy = AlphaBetaAI::for_difficulty(Player::Two, Difficulty::Easy);
    let easy_report = easy.analyze(&board);
    let easy_time = start.elapsed();

    let start = Instant::now();
    let mut hard = AlphaBetaAI::for_difficulty(Player::Two, Difficulty::Hard);
    let hard_report = hard.analyze(&board);
    let hard_time = start.elapsed();

    println!("Alpha-Beta Performance:");
    println!("  Easy: {:?} ({} nodes)", easy_time, easy_report.stats.nodes);
    println!("  Hard: {:?} ({} nodes)", hard_time, hard_report.stats.nodes);

    assert!(hard_report.stats.nodes > easy_report.stats.nodes);
    assert!(hard_report.column < COLS);
    assert!(hard_time.as_secs() < 60, "Hard search took too long");

    // Applying the chosen column must be legal
    assert!(apply_move(&board, hard_report.column, Player::Two).is_ok());
}
