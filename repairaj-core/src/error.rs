//! Error type for the repair pipeline.
//!
//! Distinguishes between:
//! - cancellation: the user backed out of the model prompt; not a fault
//! - user-facing failures: the project is not in a repairable shape
//! - unexpected failures: I/O and everything else, carrying full context

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepairError {
    /// No project root could be resolved.
    #[error("no project is open")]
    NoWorkspace,

    /// The exporter's top-level directory is missing from the project.
    #[error("{path} does not exist")]
    MissingDirectory { path: Utf8PathBuf },

    /// The model prompt was abandoned.
    #[error("model selection cancelled")]
    UserCancelled,

    /// The function root holds no model directories.
    #[error("no models found under {path}")]
    NoModels { path: Utf8PathBuf },

    /// The chosen model is not one of the discovered ones.
    #[error("unknown model `{model}` (available: {})", .available.join(", "))]
    UnknownModel {
        model: String,
        available: Vec<String>,
    },

    #[error("{0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl RepairError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RepairError::UserCancelled)
    }

    /// True for failures that are fully described by their message.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, RepairError::Unexpected(_))
    }

    /// Cancellation is a successful no-op.
    pub fn exit_code(&self) -> u8 {
        match self {
            RepairError::UserCancelled => 0,
            _ => 1,
        }
    }
}

pub type RepairResult<T> = Result<T, RepairError>;
