//! Game driver: alternates two agents over one authoritative [`Position`]
//! until the game ends, then pays out terminal rewards.

use tracing::{debug, warn};

use crate::agent::Agent;
use crate::board::{Board, Stone};
use crate::constants::{REWARD_LOSS, REWARD_TIE_FIRST, REWARD_TIE_SECOND, REWARD_WIN};
use crate::position::{Move, Outcome, Position};

/// Summary of a finished game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub outcome: Outcome,
    /// Plies played, passes included
    pub plies: usize,
    /// Plies resolved as a pass after an agent exhausted its retries
    pub forced_passes: usize,
    pub final_board: Board,
}

/// Terminal rewards as `(black, white)`.
///
/// A tie is split asymmetrically in favour of the first player.
pub fn rewards(outcome: Outcome) -> (f64, f64) {
    match outcome {
        Outcome::Winner(Stone::Black) => (REWARD_WIN, REWARD_LOSS),
        Outcome::Winner(Stone::White) => (REWARD_LOSS, REWARD_WIN),
        Outcome::Tie => (REWARD_TIE_FIRST, REWARD_TIE_SECOND),
    }
}

pub fn dispatch_rewards(outcome: Outcome, black: &mut dyn Agent, white: &mut dyn Agent) {
    let (b, w) = rewards(outcome);
    black.feed_reward(b);
    white.feed_reward(w);
}

/// Play one game from the empty board. Black moves first.
///
/// Both agents see the same snapshot: after every ply, current and previous
/// are both set to the authoritative board. Only the mover records the new
/// state. A rejected placement does not consume the turn; the same agent is
/// asked again, up to `max_invalid_attempts` times, after which the ply is
/// played as a pass.
pub fn play_game(
    black: &mut dyn Agent,
    white: &mut dyn Agent,
    max_invalid_attempts: usize,
) -> GameResult {
    let mut pos = Position::new();
    let mut view = Board::new();
    let mut forced_passes = 0;

    while !pos.game_end() {
        let stone = pos.to_play;
        let agent: &mut dyn Agent = match stone {
            Stone::Black => &mut *black,
            Stone::White => &mut *white,
        };

        let mut attempts = 0;
        loop {
            let mv = agent.get_move(&view, &view);
            debug_assert_eq!(mv.stone(), stone, "agent played the wrong colour");
            match pos.play(mv) {
                Ok(_) => break,
                Err(e) => {
                    attempts += 1;
                    debug!(agent = agent.name(), error = %e, attempts, "move rejected");
                    agent.rejected(mv, &e);
                    if attempts >= max_invalid_attempts {
                        warn!(
                            agent = agent.name(),
                            attempts, "too many rejected moves, passing"
                        );
                        // A pass is always accepted.
                        let _ = pos.play(Move::Pass(stone));
                        forced_passes += 1;
                        break;
                    }
                }
            }
        }

        view = pos.board;
        agent.record_state(&pos.board);
    }

    let outcome = pos.judge_winner();
    debug!(?outcome, plies = pos.n_move, "game over");
    dispatch_rewards(outcome, black, white);

    GameResult {
        outcome,
        plies: pos.n_move,
        forced_passes,
        final_board: pos.board,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{ManualAgent, RandomAgent, TableAgent};
    use crate::config::AgentConfig;
    use crate::constants::MAX_MOVES;

    /// Replays a fixed script, then passes.
    struct Scripted {
        stone: Stone,
        moves: Vec<Move>,
        recorded: Vec<String>,
        rewards: Vec<f64>,
        rejections: usize,
    }

    impl Scripted {
        fn new(stone: Stone, cells: &[(usize, usize)]) -> Self {
            let mut moves: Vec<Move> = cells
                .iter()
                .map(|&(row, col)| Move::Place { row, col, stone })
                .collect();
            moves.reverse();
            Self {
                stone,
                moves,
                recorded: Vec::new(),
                rewards: Vec::new(),
                rejections: 0,
            }
        }
    }

    impl Agent for Scripted {
        fn stone(&self) -> Stone {
            self.stone
        }
        fn name(&self) -> &str {
            "scripted"
        }
        fn get_move(&mut self, _board: &Board, _previous: &Board) -> Move {
            self.moves.pop().unwrap_or(Move::Pass(self.stone))
        }
        fn record_state(&mut self, board: &Board) {
            self.recorded.push(board.key());
        }
        fn feed_reward(&mut self, reward: f64) {
            self.rewards.push(reward);
        }
        fn rejected(&mut self, _mv: Move, _error: &crate::position::MoveError) {
            self.rejections += 1;
        }
    }

    #[test]
    fn test_rewards_table() {
        assert_eq!(rewards(Outcome::Winner(Stone::Black)), (1.0, 0.0));
        assert_eq!(rewards(Outcome::Winner(Stone::White)), (0.0, 1.0));
        assert_eq!(rewards(Outcome::Tie), (0.5, 0.1));
    }

    #[test]
    fn test_double_pass_ends_scripted_game() {
        let mut black = Scripted::new(Stone::Black, &[(2, 2)]);
        let mut white = Scripted::new(Stone::White, &[(0, 0)]);
        let result = play_game(&mut black, &mut white, 8);
        // B place, W place, B pass, W pass.
        assert_eq!(result.plies, 4);
        assert_eq!(result.outcome, Outcome::Winner(Stone::White));
        assert_eq!(black.recorded.len(), 2);
        assert_eq!(white.recorded.len(), 2);

        // Each mover records the board as it stands after its own ply.
        let mut after_black = Board::new();
        after_black.place(2, 2, Stone::Black);
        let mut after_white = after_black;
        after_white.place(0, 0, Stone::White);
        assert_eq!(black.recorded[0], after_black.key());
        assert_eq!(white.recorded[0], after_white.key());
        assert_eq!(black.recorded[1], after_white.key());
        assert_eq!(white.recorded[1], after_white.key());

        assert_eq!(black.rewards, vec![0.0]);
        assert_eq!(white.rewards, vec![1.0]);
    }

    #[test]
    fn test_rejected_move_is_retried_without_consuming_turn() {
        // Black tries an occupied cell on its second turn, then a free one.
        let mut black = Scripted::new(Stone::Black, &[(0, 0), (0, 0), (4, 4)]);
        let mut white = Scripted::new(Stone::White, &[(2, 2)]);
        let result = play_game(&mut black, &mut white, 8);
        assert_eq!(result.final_board.get(4, 4), Some(Stone::Black));
        assert_eq!(black.recorded.len(), 3);
        assert_eq!(black.rejections, 1);
        assert_eq!(result.forced_passes, 0);
    }

    #[test]
    fn test_manual_player_sees_rejection() {
        let input = b"2,2\n0,0\n1,1\n".as_slice();
        let mut output = Vec::new();
        let mut black = ManualAgent::new(Stone::Black, input, &mut output);
        let mut white = Scripted::new(Stone::White, &[(0, 0)]);
        let result = play_game(&mut black, &mut white, 8);
        assert_eq!(result.final_board.get(1, 1), Some(Stone::Black));
        drop(black);

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Invalid placement: illegal move at (0, 0): point not empty"));
    }

    #[test]
    fn test_retry_limit_forces_pass() {
        let mut black = Scripted::new(Stone::Black, &[(0, 0), (0, 0), (0, 0)]);
        let mut white = Scripted::new(Stone::White, &[(2, 2)]);
        let result = play_game(&mut black, &mut white, 2);
        assert_eq!(result.forced_passes, 1);
    }

    #[test]
    fn test_self_play_respects_move_limit() {
        let config = AgentConfig {
            seed: Some(9),
            ..AgentConfig::default()
        };
        let mut black = TableAgent::new("b", Stone::Black, &config);
        let mut white = TableAgent::new("w", Stone::White, &config);
        let result = play_game(&mut black, &mut white, 64);
        assert!(result.plies <= MAX_MOVES);
        let (b, w) = (result.final_board.count(Stone::Black), result.final_board.count(Stone::White));
        assert!(b + w <= crate::constants::BOARD_CELLS);
        // Each ply lands in exactly one trace.
        assert_eq!(black.trace().len() + white.trace().len(), result.plies);
        assert!(!black.table().is_empty());
        assert!(!white.table().is_empty());
    }

    #[test]
    fn test_random_agents_finish() {
        for seed in 0..20 {
            let mut black = RandomAgent::new(Stone::Black, Some(seed));
            let mut white = RandomAgent::new(Stone::White, Some(seed));
            let result = play_game(&mut black, &mut white, 64);
            assert!(result.plies <= MAX_MOVES);
        }
    }
}
