//! Tabular state-value function.
//!
//! Keys are [`Board::key`](crate::board::Board::key) serializations. Unseen
//! states are worth `0.0`; entries are only ever created or updated by the
//! end-of-game backward sweep, never removed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::Board;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTable {
    values: HashMap<String, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a serialized state, `0.0` if never visited.
    pub fn get(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }

    pub fn value_of(&self, board: &Board) -> f64 {
        self.get(&board.key())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Backward temporal-difference sweep over one episode.
    ///
    /// Walks `trace` from the last visited state to the first. Each state
    /// moves toward `discount * target`, and its new value becomes the target
    /// for the state before it:
    ///
    /// ```text
    /// v[s] += learning_rate * (discount * target - v[s]);  target = v[s]
    /// ```
    pub fn backup(&mut self, trace: &[String], reward: f64, learning_rate: f64, discount: f64) {
        let mut target = reward;
        for state in trace.iter().rev() {
            let v = self.values.entry(state.clone()).or_insert(0.0);
            *v += learning_rate * (discount * target - *v);
            target = *v;
        }
    }
}
