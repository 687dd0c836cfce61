//! Players that can be driven by the game loop.
//!
//! - [`TableAgent`] learns a [`ValueTable`] by self-play: epsilon-greedy move
//!   selection, one trace entry per own ply, and a backward sweep at game end.
//! - [`RandomAgent`] picks uniformly among legal candidates and never learns.
//! - [`ManualAgent`] reads moves as text, for interactive play.

use std::io::{BufRead, Write};

use tracing::{trace, warn};

use crate::board::{Board, Point, Stone};
use crate::config::AgentConfig;
use crate::interchange::parse_move;
use crate::movegen::legal_candidates;
use crate::position::{Move, MoveError};
use crate::value::ValueTable;

/// Capability the game driver needs from a player.
pub trait Agent {
    /// Colour this agent plays.
    fn stone(&self) -> Stone;

    fn name(&self) -> &str;

    /// Choose a move given the agent's view of the board.
    fn get_move(&mut self, board: &Board, previous: &Board) -> Move;

    /// The engine refused `mv`; the agent will be asked again.
    fn rejected(&mut self, _mv: Move, _error: &MoveError) {}

    /// Record a state this agent produced. Called after each of its own plies.
    fn record_state(&mut self, _board: &Board) {}

    /// Terminal reward for the finished game.
    fn feed_reward(&mut self, _reward: f64) {}

    /// Forget per-game state before the next game.
    fn reset(&mut self) {}
}

fn seeded_rng(seed: Option<u64>, stone: Stone) -> fastrand::Rng {
    match seed {
        Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(stone.code() as u64)),
        None => fastrand::Rng::new(),
    }
}

/// Epsilon-greedy learner over a tabular value function.
pub struct TableAgent {
    name: String,
    stone: Stone,
    table: ValueTable,
    trace: Vec<String>,
    learning_rate: f64,
    discount: f64,
    exploration_rate: f64,
    rng: fastrand::Rng,
}

impl TableAgent {
    pub fn new(name: impl Into<String>, stone: Stone, config: &AgentConfig) -> Self {
        Self {
            name: name.into(),
            stone,
            table: ValueTable::new(),
            trace: Vec::new(),
            learning_rate: config.learning_rate,
            discount: config.discount,
            exploration_rate: config.exploration_rate,
            rng: seeded_rng(config.seed, stone),
        }
    }

    /// A non-exploring agent that plays its table's best move.
    pub fn greedy(name: impl Into<String>, stone: Stone, table: ValueTable) -> Self {
        let config = AgentConfig {
            exploration_rate: 0.0,
            ..AgentConfig::default()
        };
        Self::new(name, stone, &config).with_table(table)
    }

    pub fn with_table(mut self, table: ValueTable) -> Self {
        self.table = table;
        self
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ValueTable {
        &mut self.table
    }

    /// States visited in the current game, oldest first.
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn decay_exploration(&mut self, factor: f64) {
        self.exploration_rate *= factor;
    }

    /// Pick among non-empty `candidates`: a uniform draw with probability
    /// `exploration_rate`, otherwise the candidate whose resulting board has
    /// the highest table value. Ties keep the earliest candidate.
    fn choose_action(&mut self, board: &Board, candidates: &[Point]) -> Point {
        if self.rng.f64() < self.exploration_rate {
            return candidates[self.rng.usize(..candidates.len())];
        }
        let mut best = candidates[0];
        let mut best_value = f64::NEG_INFINITY;
        for &(r, c) in candidates {
            let mut next = *board;
            next.place(r, c, self.stone);
            let value = self.table.value_of(&next);
            if value > best_value {
                best_value = value;
                best = (r, c);
            }
        }
        best
    }
}

impl Agent for TableAgent {
    fn stone(&self) -> Stone {
        self.stone
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, board: &Board, previous: &Board) -> Move {
        let candidates = legal_candidates(board, previous, self.stone);
        if candidates.is_empty() {
            trace!(agent = %self.name, "no candidates, passing");
            return Move::Pass(self.stone);
        }
        let (row, col) = self.choose_action(board, &candidates);
        Move::Place {
            row,
            col,
            stone: self.stone,
        }
    }

    fn record_state(&mut self, board: &Board) {
        self.trace.push(board.key());
    }

    fn feed_reward(&mut self, reward: f64) {
        self.table
            .backup(&self.trace, reward, self.learning_rate, self.discount);
    }

    fn reset(&mut self) {
        self.trace.clear();
    }
}

/// Uniformly random legal play.
pub struct RandomAgent {
    stone: Stone,
    rng: fastrand::Rng,
}

impl RandomAgent {
    pub fn new(stone: Stone, seed: Option<u64>) -> Self {
        Self {
            stone,
            rng: seeded_rng(seed, stone),
        }
    }
}

impl Agent for RandomAgent {
    fn stone(&self) -> Stone {
        self.stone
    }

    fn name(&self) -> &str {
        "random"
    }

    fn get_move(&mut self, board: &Board, previous: &Board) -> Move {
        let candidates = legal_candidates(board, previous, self.stone);
        match self.rng.choice(candidates) {
            Some((row, col)) => Move::Place {
                row,
                col,
                stone: self.stone,
            },
            None => Move::Pass(self.stone),
        }
    }
}

/// A human at a terminal, or any line-oriented source of moves.
///
/// Malformed lines are reported and re-prompted. End of input counts as a
/// pass. Legality is left to the engine; a rejected move is reported before
/// the next prompt.
pub struct ManualAgent<R, W> {
    stone: Stone,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ManualAgent<R, W> {
    pub fn new(stone: Stone, input: R, output: W) -> Self {
        Self {
            stone,
            input,
            output,
        }
    }
}

impl<R: BufRead, W: Write> Agent for ManualAgent<R, W> {
    fn stone(&self) -> Stone {
        self.stone
    }

    fn name(&self) -> &str {
        "manual"
    }

    fn get_move(&mut self, board: &Board, _previous: &Board) -> Move {
        loop {
            // Prompt failures are not fatal; the move is still read.
            let _ = write!(
                self.output,
                "{board}{} to move (row,col or PASS): ",
                self.stone
            );
            let _ = self.output.flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return Move::Pass(self.stone),
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "failed to read move, passing");
                    return Move::Pass(self.stone);
                }
            }
            match parse_move(&line, self.stone) {
                Some(mv) => return mv,
                None => {
                    let _ = writeln!(self.output, "could not parse '{}'", line.trim());
                }
            }
        }
    }

    fn rejected(&mut self, _mv: Move, error: &MoveError) {
        let _ = writeln!(self.output, "Invalid placement: {error}");
    }
}
