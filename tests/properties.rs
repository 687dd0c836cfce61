//! Property-based tests for the rule engine
//!
//! Arbitrary boards are not always reachable positions, but every rule below
//! must hold for any board the engine can be handed.

use std::collections::BTreeSet;

use proptest::prelude::*;

use little_go::board::{Board, Point, Stone};
use little_go::constants::{BOARD_CELLS, N};
use little_go::movegen::{available_positions, legal_candidates};
use little_go::position::{Move, MoveError, Position, check_placement};

// ============================================================================
// Generators
// ============================================================================

fn arb_cell() -> impl Strategy<Value = Option<Stone>> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some(Stone::Black)),
        1 => Just(Some(Stone::White)),
    ]
}

fn arb_board() -> impl Strategy<Value = Board> {
    prop::collection::vec(arb_cell(), BOARD_CELLS).prop_map(|cells| {
        let mut board = Board::new();
        for (i, cell) in cells.into_iter().enumerate() {
            board.set(i / N, i % N, cell);
        }
        board
    })
}

fn arb_stone() -> impl Strategy<Value = Stone> {
    prop_oneof![Just(Stone::Black), Just(Stone::White)]
}

fn arb_point() -> impl Strategy<Value = Point> {
    (0..N, 0..N)
}

/// Every stone on a board where no group is dead.
fn settled_board() -> impl Strategy<Value = Board> {
    arb_board().prop_map(|mut board| {
        for stone in [Stone::Black, Stone::White] {
            let dead = board.dead_stones(stone);
            board.remove_stones(&dead);
        }
        board
    })
}

// ============================================================================
// Groups
// ============================================================================

proptest! {
    #[test]
    fn groups_are_closed_and_disjoint(board in arb_board()) {
        let mut seen: BTreeSet<Point> = BTreeSet::new();
        for ((r, c), cell) in board.cells() {
            let Some(stone) = cell else { continue };
            let group = board.group(r, c);
            prop_assert!(group.contains(&(r, c)));
            for &(gr, gc) in &group {
                prop_assert_eq!(board.get(gr, gc), Some(stone));
                // No same-colour neighbour lies outside the group.
                for (nr, nc) in Board::neighbors(gr, gc) {
                    if board.get(nr, nc) == Some(stone) {
                        prop_assert!(group.contains(&(nr, nc)));
                    }
                }
            }
            // Groups either coincide or do not overlap.
            if seen.contains(&(r, c)) {
                prop_assert!(group.iter().all(|p| seen.contains(p)));
            } else {
                prop_assert!(group.iter().all(|p| !seen.contains(p)));
                seen.extend(group);
            }
        }
    }

    #[test]
    fn score_never_exceeds_board(board in arb_board()) {
        let pos = Position { board, previous: board, ..Position::new() };
        let total = pos.score(Stone::Black) + pos.score(Stone::White);
        prop_assert!(total <= BOARD_CELLS);
        prop_assert_eq!(total == BOARD_CELLS, board.empty_count() == 0);
    }
}

// ============================================================================
// Placement
// ============================================================================

proptest! {
    #[test]
    fn legal_placement_leaves_no_dead_groups(
        board in settled_board(),
        stone in arb_stone(),
        (r, c) in arb_point(),
    ) {
        if let Ok(placement) = check_placement(&board, &board, false, r, c, stone) {
            let after = placement.board;
            prop_assert_eq!(after.get(r, c), Some(stone));
            prop_assert!(after.has_liberty(r, c));
            prop_assert!(after.dead_stones(stone.opponent()).is_empty());
            for &(cr, cc) in &placement.captured {
                prop_assert_eq!(board.get(cr, cc), Some(stone.opponent()));
                prop_assert_eq!(after.get(cr, cc), None);
            }
        }
    }

    #[test]
    fn legality_check_is_pure_and_repeatable(
        board in arb_board(),
        previous in arb_board(),
        ko_armed in any::<bool>(),
        stone in arb_stone(),
        (r, c) in arb_point(),
    ) {
        let before = board;
        let first = check_placement(&board, &previous, ko_armed, r, c, stone);
        let second = check_placement(&board, &previous, ko_armed, r, c, stone);
        prop_assert_eq!(board, before);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ko_rejection_only_when_armed_and_repeating(
        board in arb_board(),
        previous in arb_board(),
        stone in arb_stone(),
        (r, c) in arb_point(),
    ) {
        if let Err(MoveError::Ko(..)) = check_placement(&board, &previous, true, r, c, stone) {
            // Unarmed, the same move is accepted and recreates `previous`.
            let placement = check_placement(&board, &previous, false, r, c, stone);
            prop_assert!(placement.is_ok());
            prop_assert_eq!(placement.map(|p| p.board).ok(), Some(previous));
        }
    }

    #[test]
    fn rejected_move_leaves_position_unchanged(
        board in arb_board(),
        stone in arb_stone(),
        (r, c) in arb_point(),
    ) {
        let mut pos = Position { board, previous: board, to_play: stone, ..Position::new() };
        let snapshot = (pos.board, pos.previous, pos.n_move, pos.to_play);
        let legal = pos.is_legal(r, c, stone);
        let played = pos.play(Move::Place { row: r, col: c, stone });
        prop_assert_eq!(legal, played.is_ok());
        if !legal {
            prop_assert_eq!((pos.board, pos.previous, pos.n_move, pos.to_play), snapshot);
        }
    }

    #[test]
    fn candidates_are_empty_legal_points(board in arb_board(), stone in arb_stone()) {
        let heuristic = available_positions(&board, stone);
        for &(r, c) in &legal_candidates(&board, &board, stone) {
            prop_assert!(board.is_empty_at(r, c));
            prop_assert!(heuristic.contains(&(r, c)));
            prop_assert!(check_placement(&board, &board, false, r, c, stone).is_ok());
        }
    }
}
