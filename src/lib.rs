//! Little-Go: a 5x5 Go rules engine with a self-play value-table learner.
//!
//! Two agents play each other on a small board; each keeps a table mapping
//! exact board configurations to a learned value, updated after every game
//! by a backward temporal-difference sweep over the states it produced.
//!
//! ## Modules
//!
//! - [`constants`] - Board size, komi, learning defaults, exit codes
//! - [`board`] - Board state, groups and liberties
//! - [`position`] - Rule engine (legality, captures, ko, scoring)
//! - [`movegen`] - Candidate moves for agents
//! - [`value`] - Tabular value function
//! - [`agent`] - Table, random, and manual players
//! - [`game`] - Game driver and terminal rewards
//! - [`trainer`] - Self-play training schedule
//! - [`policy`] - Value table persistence
//! - [`interchange`] - Board and decision files
//! - [`judge`] - File-based single-move adjudication
//! - [`config`] - TOML configuration
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use little_go::agent::TableAgent;
//! use little_go::board::Stone;
//! use little_go::config::AgentConfig;
//! use little_go::game::play_game;
//!
//! let config = AgentConfig { seed: Some(1), ..AgentConfig::default() };
//! let mut black = TableAgent::new("player1", Stone::Black, &config);
//! let mut white = TableAgent::new("player2", Stone::White, &config);
//!
//! let result = play_game(&mut black, &mut white, 64);
//! println!("{:?} after {} plies", result.outcome, result.plies);
//! assert!(!black.table().is_empty());
//! ```

pub mod agent;
pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod interchange;
pub mod judge;
pub mod movegen;
pub mod policy;
pub mod position;
pub mod trainer;
pub mod value;
