//! Move application, win and draw detection

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, COLS, DIRECTIONS, ROWS, WIN_LENGTH};
use crate::error::MoveError;

/// Result of a successful drop: the new board and where the piece landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub board: Board,
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

/// State of a game after a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Ongoing,
    PlayerOneWins,
    PlayerTwoWins,
    Draw,
}

impl Outcome {
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::One => Outcome::PlayerOneWins,
            Player::Two => Outcome::PlayerTwoWins,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::PlayerOneWins => Some(Player::One),
            Outcome::PlayerTwoWins => Some(Player::Two),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }

    pub fn is_over(self) -> bool {
        self != Outcome::Ongoing
    }
}

/// Drop a piece for `player` into `column`. The input board is left untouched.
pub fn apply_move(board: &Board, column: usize, player: Player) -> Result<Placement, MoveError> {
    if column >= COLS {
        return Err(MoveError::ColumnOutOfRange { column });
    }
    let row = board
        .landing_row(column)
        .ok_or(MoveError::ColumnFull { column })?;

    let mut next = *board;
    next.set(row, column, player);

    Ok(Placement {
        board: next,
        row,
        col: column,
        player,
    })
}

/// True if the piece of `player` at (`row`, `col`) is part of a line of four or more.
///
/// Only the four lines through the given cell are walked.
pub fn detect_win(board: &Board, row: usize, col: usize, player: Player) -> bool {
    if row >= ROWS || col >= COLS || board.get(row, col) != Some(player) {
        return false;
    }

    let (row, col) = (row as isize, col as isize);
    DIRECTIONS.iter().any(|&(dr, dc)| {
        let forward = run_length(board, row, col, dr, dc, player);
        let backward = run_length(board, row, col, -dr, -dc, player);
        1 + forward + backward >= WIN_LENGTH
    })
}

/// Consecutive `player` cells starting one step away from (row, col)
fn run_length(board: &Board, row: isize, col: isize, dr: isize, dc: isize, player: Player) -> usize {
    (1..WIN_LENGTH as isize)
        .take_while(|&i| board.get_signed(row + dr * i, col + dc * i) == Some(player))
        .count()
}

/// True when the top row is full
pub fn detect_draw(board: &Board) -> bool {
    board.is_full()
}

/// Full-board scan for a completed line of `player`
pub fn has_four(board: &Board, player: Player) -> bool {
    (0..ROWS).any(|row| (0..COLS).any(|col| detect_win(board, row, col, player)))
}

/// Outcome immediately after `placement` was applied
pub fn outcome_after(placement: &Placement) -> Outcome {
    if detect_win(&placement.board, placement.row, placement.col, placement.player) {
        Outcome::win_for(placement.player)
    } else if detect_draw(&placement.board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    /// Brute force: any line of four anywhere on the board that contains (row, col)
    fn brute_force_win(board: &Board, row: usize, col: usize, player: Player) -> bool {
        for &(dr, dc) in DIRECTIONS.iter() {
            for offset in 0..WIN_LENGTH as isize {
                let start_r = row as isize - dr * offset;
                let start_c = col as isize - dc * offset;
                let all = (0..WIN_LENGTH as isize)
                    .all(|i| board.get_signed(start_r + dr * i, start_c + dc * i) == Some(player));
                if all {
                    return true;
                }
            }
        }
        false
    }

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

    #[test]
    fn test_apply_move_gravity() {
        let board = Board::new();
        let first = apply_move(&board, 3, Player::One).unwrap();
        assert_eq!(first.row, ROWS - 1);
        let second = apply_move(&first.board, 3, Player::Two).unwrap();
        assert_eq!(second.row, ROWS - 2);
        assert_eq!(second.board.get(ROWS - 1, 3), Some(Player::One));
        assert_eq!(second.board.get(ROWS - 2, 3), Some(Player::Two));
        // Original snapshot untouched
        assert_eq!(board.piece_count(), 0);
        assert_eq!(first.board.piece_count(), 1);
    }

    #[test]
    fn test_apply_move_invalid() {
        let board = Board::new();
        assert_eq!(
            apply_move(&board, 7, Player::One),
            Err(MoveError::ColumnOutOfRange { column: 7 })
        );

        let full_column = Board::from_moves(&[0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(
            apply_move(&full_column, 0, Player::One),
            Err(MoveError::ColumnFull { column: 0 })
        );
    }

    #[test]
    fn test_detect_win_directions() {
        // Horizontal
        let board = Board::from_rows(&[
            ".......", ".......", ".......", ".......", "OOO....", "XXXX...",
        ])
        .unwrap();
        assert!(detect_win(&board, 5, 3, Player::One));
        assert!(detect_win(&board, 5, 0, Player::One));
        assert!(!detect_win(&board, 4, 2, Player::Two));

        // Vertical
        let board = Board::from_rows(&[
            ".......", ".......", "X......", "X.....O", "X.....O", "X.....O",
        ])
        .unwrap();
        assert!(detect_win(&board, 2, 0, Player::One));
        assert!(!detect_win(&board, 3, 6, Player::Two));

        // Rising diagonal
        let board = Board::from_rows(&[
            ".......", ".......", "...X...", "..XO...", ".XOO...", "XOOX...",
        ])
        .unwrap();
        assert!(detect_win(&board, 2, 3, Player::One));
        assert!(detect_win(&board, 4, 1, Player::One));

        // Falling diagonal
        let board = Board::from_rows(&[
            ".......", ".......", "...O...", "...XO..", "...XXO.", "...XXXO",
        ])
        .unwrap();
        assert!(detect_win(&board, 5, 6, Player::Two));
        assert!(detect_win(&board, 2, 3, Player::Two));
    }

    #[test]
    fn test_detect_win_requires_own_piece() {
        // Three in a row with an open end is not a win at the empty cell
        let board = Board::from_rows(&[
            ".......", ".......", ".......", ".......", "OO.....", "XXX....",
        ])
        .unwrap();
        assert!(!detect_win(&board, 5, 3, Player::One));
        assert!(!detect_win(&board, 5, 0, Player::Two));
        assert!(!has_four(&board, Player::One));
    }

    #[test]
    fn test_full_board_draw() {
        let board = drawn_board();
        assert!(detect_draw(&board));
        assert_eq!(board.count(Player::One), 21);
        assert_eq!(board.count(Player::Two), 21);
        assert!(!detect_win(&board, 0, 6, Player::Two));
        assert!(!has_four(&board, Player::One));
        assert!(!has_four(&board, Player::Two));
    }

    #[test]
    fn test_outcome_after_final_drop_is_draw() {
        let full = drawn_board();
        let rows: Vec<String> = full.to_string().lines().map(str::to_string).collect();
        let mut top = rows[0].clone();
        top.replace_range(6..7, ".");
        let mut partial_rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        partial_rows[0] = top.as_str();
        let board = Board::from_rows(&partial_rows).unwrap();

        let placement = apply_move(&board, 6, Player::Two).unwrap();
        assert_eq!(placement.row, 0);
        assert_eq!(outcome_after(&placement), Outcome::Draw);
    }

    #[test]
    fn test_outcome_after_win() {
        let board = Board::from_moves(&[0, 6, 1, 6, 2, 6]).unwrap();
        let placement = apply_move(&board, 3, Player::One).unwrap();
        assert_eq!(outcome_after(&placement), Outcome::PlayerOneWins);
        assert_eq!(outcome_after(&placement).winner(), Some(Player::One));
    }

    #[test]
    fn test_random_playouts_match_brute_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let mut board = Board::new();
            let mut player = Player::One;

            loop {
                let legal: Vec<usize> = board.legal_columns().collect();
                let Some(&column) = legal.choose(&mut rng) else {
                    break;
                };

                let expected_row = board.landing_row(column).unwrap();
                let before = board.piece_count();
                let placement = apply_move(&board, column, player).unwrap();

                assert_eq!(placement.row, expected_row);
                assert_eq!(placement.board.piece_count(), before + 1);

                let won = detect_win(&placement.board, placement.row, column, player);
                assert_eq!(won, brute_force_win(&placement.board, placement.row, column, player));
                assert_eq!(
                    detect_draw(&placement.board),
                    placement.board.legal_columns().next().is_none()
                );

                board = placement.board;
                if won || detect_draw(&board) {
                    break;
                }
                player = player.opponent();
            }
        }
    }
}
