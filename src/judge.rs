//! Single-move adjudication for games played through interchange files.
//!
//! One invocation reads the board file and the mover's decision file, applies
//! the decision, and either declares a result or writes the next board file
//! for the opponent. Any unreadable decision or illegal placement forfeits
//! the game to the opponent. [`respond`] is the player side of the same
//! exchange.

use std::path::Path;

use tracing::{info, warn};

use crate::agent::Agent;
use crate::board::Stone;
use crate::constants::EXIT_CONTINUE;
use crate::error::InterchangeError;
use crate::interchange::{
    BoardRecord, format_move, read_decision, read_input, write_decision, write_input,
};
use crate::position::{Move, Outcome, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The next board file has been written.
    Continue,
    /// The game ended normally.
    Finished(Outcome),
    /// The mover lost by submitting a bad decision.
    Forfeit { winner: Stone, reason: String },
}

impl Verdict {
    /// Process exit code: `0` to continue, otherwise the winner's piece type
    /// (`0` again for a tie).
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Continue => EXIT_CONTINUE,
            Verdict::Finished(outcome) => outcome.code(),
            Verdict::Forfeit { winner, .. } => winner.code() as i32,
        }
    }
}

/// Adjudicate one move.
///
/// `n_move` is the number of plies played before this decision. Errors are
/// returned only when the board file itself cannot be read or written.
pub fn adjudicate(input: &Path, decision: &Path, n_move: usize) -> Result<Verdict, InterchangeError> {
    let record = read_input(input)?;
    let mover = record.stone;
    let mut pos = Position::from_interchange(mover, record.previous, record.board);
    pos.n_move = n_move;

    let mv = match read_decision(decision, mover) {
        Ok(mv) => mv,
        Err(e) => {
            warn!(error = %e, "decision file missing or invalid");
            return Ok(Verdict::Forfeit {
                winner: mover.opponent(),
                reason: e.to_string(),
            });
        }
    };

    if let Err(e) = pos.apply(mv) {
        warn!(error = %e, "illegal decision");
        return Ok(Verdict::Forfeit {
            winner: mover.opponent(),
            reason: e.to_string(),
        });
    }

    if pos.game_end() {
        let outcome = pos.judge_winner();
        info!(?outcome, "game over");
        return Ok(Verdict::Finished(outcome));
    }

    write_input(
        input,
        &BoardRecord {
            stone: mover.opponent(),
            previous: pos.previous,
            board: pos.board,
        },
    )?;
    Ok(Verdict::Continue)
}

/// Play one move as `agent` from the board file, writing the decision file.
///
/// The agent's choice is checked against the full rules for the recorded
/// position, including the ko guard the agent itself cannot see; a move the
/// judge would reject is replaced by a pass.
pub fn respond(input: &Path, decision: &Path, agent: &mut dyn Agent) -> Result<Move, InterchangeError> {
    let record = read_input(input)?;
    let pos = Position::from_interchange(record.stone, record.previous, record.board);
    let mut mv = agent.get_move(&record.board, &record.previous);
    if let Move::Place { row, col, stone } = mv {
        if let Err(e) = pos.check_placement(row, col, stone) {
            warn!(error = %e, "agent chose an illegal move, passing instead");
            mv = Move::Pass(record.stone);
        }
    }
    write_decision(decision, &mv)?;
    info!(decision = %format_move(&mv), "decision written");
    Ok(mv)
}
