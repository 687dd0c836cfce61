//! Candidate generation for agents.
//!
//! Two layers, kept distinct because the exploration distribution depends
//! on the looser one:
//!
//! 1. [`available_positions`]: a fast adjacency filter that drops an empty
//!    cell only when every in-bounds orthogonal neighbour holds an opponent
//!    stone (four in the interior, three on an edge, two in a corner). It
//!    does not look at liberties, so it still admits suicides next to own
//!    stones and excludes capturing moves into a surrounded point.
//! 2. [`legal_candidates`]: the positions from (1) that also pass the rule
//!    engine's placement check on the agent's own snapshot.

use crate::board::{Board, Point, Stone};
use crate::constants::N;
use crate::position::check_placement;

/// Empty cells not fully enclosed by opponent stones, in row-major order.
pub fn available_positions(board: &Board, stone: Stone) -> Vec<Point> {
    let target = Some(stone.opponent());
    let mut positions = Vec::new();
    for row in 0..N {
        for col in 0..N {
            if board.get(row, col).is_some() {
                continue;
            }
            let enclosed = Board::neighbors(row, col).all(|(r, c)| board.get(r, c) == target);
            if !enclosed {
                positions.push((row, col));
            }
        }
    }
    positions
}

/// Positions from [`available_positions`] that are legal placements.
///
/// Agents carry no capture history of their own, so the ko guard is never
/// armed here; the engine re-checks every submitted move.
pub fn legal_candidates(board: &Board, previous: &Board, stone: Stone) -> Vec<Point> {
    available_positions(board, stone)
        .into_iter()
        .filter(|&(r, c)| check_placement(board, previous, false, r, c, stone).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BOARD_CELLS;

    fn board(rows: [&str; N]) -> Board {
        Board::from_digit_rows(&rows).unwrap()
    }

    #[test]
    fn test_empty_board_offers_every_cell() {
        let b = Board::new();
        assert_eq!(available_positions(&b, Stone::Black).len(), BOARD_CELLS);
        assert_eq!(available_positions(&b, Stone::Black)[0], (0, 0));
    }

    #[test]
    fn test_enclosed_interior_edge_and_corner_are_skipped() {
        let b = board(["02020", "20202", "02000", "00000", "20000"]);
        let black = available_positions(&b, Stone::Black);
        assert!(!black.contains(&(0, 0)), "corner enclosed by two");
        assert!(!black.contains(&(0, 2)), "edge enclosed by three");
        assert!(!black.contains(&(1, 1)), "interior enclosed by four");
        assert!(black.contains(&(2, 2)));
        // White sees its own stones, not enclosure.
        let white = available_positions(&b, Stone::White);
        assert!(white.contains(&(0, 0)));
        assert!(white.contains(&(1, 1)));
    }

    #[test]
    fn test_heuristic_is_looser_than_rules() {
        // (0,0) is bordered by one black and one white stone: the heuristic
        // keeps it, but for White it is suicide.
        let b = board(["01000", "21000", "10000", "00000", "00000"]);
        assert!(available_positions(&b, Stone::White).contains(&(0, 0)));
        assert!(!legal_candidates(&b, &b, Stone::White).contains(&(0, 0)));
    }

    #[test]
    fn test_heuristic_skips_capturing_move_into_enclosure() {
        // White (0,1) and (1,0) are both in atari, so Black at (0,0)
        // captures, yet the heuristic drops it because both neighbours are
        // White.
        let b = board(["02100", "21000", "10000", "00000", "00000"]);
        assert!(!available_positions(&b, Stone::Black).contains(&(0, 0)));
        assert!(check_placement(&b, &b, false, 0, 0, Stone::Black).is_ok());
    }
}
