//! CLI error type and exit codes.

use std::process::ExitCode;

use slotforge::{ConfigError, SlotForgeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A cell that could not be read; `row` and `column` are 1-based.
    #[error("row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    #[error(transparent)]
    Solve(#[from] SlotForgeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn parse(row: usize, column: usize, message: impl Into<String>) -> Self {
        CliError::Parse {
            row,
            column,
            message: message.into(),
        }
    }

    /// 1 for bad input, 2 when no assignment exists, 3 when cancelled.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Solve(SlotForgeError::Infeasible { .. }) => ExitCode::from(2),
            CliError::Solve(SlotForgeError::Cancelled) => ExitCode::from(3),
            _ => ExitCode::from(1),
        }
    }
}
