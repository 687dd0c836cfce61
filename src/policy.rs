//! Saving and loading value tables.
//!
//! A policy file is the JSON form of one agent's [`ValueTable`], named after
//! the training round and the agent: `<round>run_policy_<name>.json`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::PolicyError;
use crate::value::ValueTable;

/// A directory of policy files.
#[derive(Debug, Clone)]
pub struct PolicyStore {
    dir: PathBuf,
}

impl PolicyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the policy for `name` at `round`.
    pub fn path_for(&self, name: &str, round: usize) -> PathBuf {
        self.dir.join(format!("{round}run_policy_{name}.json"))
    }

    /// Write a table, replacing any previous file for the same round.
    pub fn save(&self, name: &str, round: usize, table: &ValueTable) -> Result<PathBuf, PolicyError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name, round);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(table)?)?;
        fs::rename(&tmp, &path)?;
        info!(path = %path.display(), states = table.len(), "saved policy");
        Ok(path)
    }
}

/// Read a policy file written by [`PolicyStore::save`].
pub fn load_policy(path: &Path) -> Result<ValueTable, PolicyError> {
    let bytes = fs::read(path).map_err(|e| PolicyError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let table: ValueTable = serde_json::from_slice(&bytes).map_err(|e| PolicyError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), states = table.len(), "loaded policy");
    Ok(table)
}
