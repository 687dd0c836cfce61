//! Self-play training loop.

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::agent::{Agent, TableAgent};
use crate::board::Stone;
use crate::config::TrainingConfig;
use crate::error::{ConfigError, PolicyError};
use crate::game::play_game;
use crate::policy::PolicyStore;
use crate::position::Outcome;

/// Aggregate statistics for a training run.
#[derive(Debug, Clone, Default)]
pub struct TrainingSummary {
    pub games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub ties: usize,
    pub total_plies: usize,
    pub black_states: usize,
    pub white_states: usize,
    pub saved: Vec<PathBuf>,
}

impl TrainingSummary {
    fn record(&mut self, outcome: Outcome, plies: usize) {
        self.games += 1;
        self.total_plies += plies;
        match outcome {
            Outcome::Winner(Stone::Black) => self.black_wins += 1,
            Outcome::Winner(Stone::White) => self.white_wins += 1,
            Outcome::Tie => self.ties += 1,
        }
    }

    pub fn average_plies(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_plies as f64 / self.games as f64
        }
    }
}

/// Runs games between two learning agents on a fixed schedule.
///
/// For game index `i`: play, reset both traces, save both policies as round
/// `i + save_every` when `i % save_every == 0`, and decay both exploration
/// rates when `i % decay_every == 0`. A final save tagged `num_games` follows
/// the last game. Without a store nothing is written.
pub struct Trainer {
    config: TrainingConfig,
    store: Option<PolicyStore>,
}

impl Trainer {
    pub fn new(config: TrainingConfig, store: Option<PolicyStore>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, store })
    }

    pub fn run(
        &self,
        black: &mut TableAgent,
        white: &mut TableAgent,
    ) -> Result<TrainingSummary, PolicyError> {
        let start = Instant::now();
        let mut summary = TrainingSummary::default();

        for i in 0..self.config.num_games {
            let result = play_game(black, white, self.config.max_invalid_attempts);
            summary.record(result.outcome, result.plies);
            black.reset();
            white.reset();

            if i % self.config.save_every == 0 {
                info!(
                    round = i,
                    black_wins = summary.black_wins,
                    white_wins = summary.white_wins,
                    ties = summary.ties,
                    "training progress"
                );
                self.save_both(black, white, i + self.config.save_every, &mut summary)?;
            }
            if i % self.config.decay_every == 0 {
                black.decay_exploration(self.config.exploration_decay);
                white.decay_exploration(self.config.exploration_decay);
                info!(exploration_rate = black.exploration_rate(), "decayed exploration");
            }
        }

        self.save_both(black, white, self.config.num_games, &mut summary)?;
        summary.black_states = black.table().len();
        summary.white_states = white.table().len();
        info!(
            games = summary.games,
            black_states = summary.black_states,
            white_states = summary.white_states,
            elapsed = ?start.elapsed(),
            "training complete"
        );
        Ok(summary)
    }

    fn save_both(
        &self,
        black: &TableAgent,
        white: &TableAgent,
        round: usize,
        summary: &mut TrainingSummary,
    ) -> Result<(), PolicyError> {
        if let Some(store) = &self.store {
            for agent in [black, white] {
                let path = store.save(agent.name(), round, agent.table())?;
                summary.saved.push(path);
            }
        }
        Ok(())
    }
}
