//! Constants for board geometry, scoring, learning defaults, and exit codes.
//!
//! The engine plays on a single fixed board size. Everything that depends on
//! it (turn limit, komi, cell count) is derived here at compile time.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 5;

/// Number of playable cells.
pub const BOARD_CELLS: usize = N * N;

/// Maximum number of plies in a game. The game ends once the move counter
/// reaches this value.
pub const MAX_MOVES: usize = N * N - 1;

// =============================================================================
// Scoring
// =============================================================================

/// Komi added to White's stone count before comparing scores.
pub const KOMI: f64 = N as f64 / 2.0;

// =============================================================================
// Temporal-Difference Learning Defaults
// =============================================================================

/// Step size for value table updates.
pub const LEARNING_RATE: f64 = 0.7;

/// Discount applied to the successor's value during the backward sweep.
pub const DISCOUNT: f64 = 0.9;

/// Probability of taking a random candidate instead of the greedy one.
pub const EXPLORATION_RATE: f64 = 0.59;

/// Factor applied to the exploration rate at every decay interval.
pub const EXPLORATION_DECAY: f64 = 0.9;

/// How many times the driver re-asks an agent after an illegal placement
/// before resolving the ply as a pass.
pub const MAX_INVALID_ATTEMPTS: usize = 64;

// =============================================================================
// Terminal Rewards
// =============================================================================

/// Reward fed to the winner.
pub const REWARD_WIN: f64 = 1.0;

/// Reward fed to the loser.
pub const REWARD_LOSS: f64 = 0.0;

/// Reward fed to the first player (Black) on a tie.
pub const REWARD_TIE_FIRST: f64 = 0.5;

/// Reward fed to the second player (White) on a tie.
pub const REWARD_TIE_SECOND: f64 = 0.1;

// =============================================================================
// Judge Exit Codes
// =============================================================================

/// The game continues; the next input file has been written.
pub const EXIT_CONTINUE: i32 = 0;

/// Abnormal termination that could not be attributed to either player.
pub const EXIT_ABNORMAL: i32 = 3;

// =============================================================================
// Interchange Defaults
// =============================================================================

/// Default board interchange file.
pub const INPUT_FILE: &str = "input.txt";

/// Default decision file.
pub const OUTPUT_FILE: &str = "output.txt";

/// Literal token for a pass in the decision file.
pub const PASS_TOKEN: &str = "PASS";
