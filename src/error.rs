//! Error types for board parsing, file interchange, policy persistence, and
//! configuration. Placement errors live with the rule engine in
//! [`crate::position::MoveError`].

use std::path::PathBuf;

/// Errors from parsing a digit-encoded board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected {expected} board rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row}: expected {expected} cells, found {found}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, column {col}: invalid cell '{found}'")]
    BadCell { row: usize, col: usize, found: char },
}

/// Errors reading or writing the board interchange and decision files.
#[derive(Debug, thiserror::Error)]
pub enum InterchangeError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid piece type '{0}' (expected 1 or 2)")]
    PieceType(String),

    #[error("malformed board: {0}")]
    Board(#[from] BoardParseError),

    #[error("malformed decision '{0}' (expected PASS or row,col)")]
    Decision(String),
}

/// Errors saving or loading a value table.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read policy {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse policy {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
