//! Persistence and service error types.
//!
//! Store errors describe what went wrong with the backing storage; service
//! errors add the outcomes callers must tell apart (validation, missing
//! round or snapshot, authorization) and wrap store failures opaquely.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{ProjectId, RoundId};

/// Snapshot storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Failed to serialize snapshot for round {round_id}")]
    Serialization {
        round_id: RoundId,
        #[source]
        source: serde_json::Error,
    },

    /// Stored record could not be read back.
    #[error("Failed to deserialize snapshot file: {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Stored record has a schema version this build does not understand.
    #[error("Snapshot schema version {found} is not supported (expected {expected})")]
    UnsupportedVersion {
        found: String,
        expected: &'static str,
        path: PathBuf,
    },

    /// A previous writer panicked while holding the store lock.
    #[error("Snapshot store lock poisoned")]
    LockPoisoned,
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Outcome of a snapshot service call that did not succeed.
#[derive(Debug, Error)]
pub enum CalcError {
    /// Request body has the wrong shape.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The round is unknown to the round directory.
    #[error("round {0} not found")]
    RoundNotFound(RoundId),

    /// The round exists but has no saved snapshot.
    #[error("no saved calculation for round {0}")]
    SnapshotNotFound(RoundId),

    /// Caller's authorization names another project.
    #[error("access to round {round_id} denied for project {project_id:?}")]
    Forbidden {
        round_id: RoundId,
        project_id: Option<ProjectId>,
    },

    /// Backing storage failed; safe to retry.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl CalcError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RoundNotFound(_) | Self::SnapshotNotFound(_))
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(reason) => format!("The calculation could not be saved: {reason}"),
            Self::RoundNotFound(round_id) => format!("Evaluation round {round_id} does not exist."),
            Self::SnapshotNotFound(round_id) => {
                format!("No calculation has been saved for evaluation round {round_id}.")
            }
            Self::Forbidden { round_id, .. } => {
                format!("You do not have access to evaluation round {round_id}.")
            }
            Self::Storage(_) => "An error occurred while accessing saved calculations.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Validation(_) => {
                Some("Send both `config` and `stats` as JSON objects.".into())
            }
            Self::RoundNotFound(_) => None,
            Self::SnapshotNotFound(_) => {
                Some("Recompute the statistics from the round data and save them.".into())
            }
            Self::Forbidden { .. } => {
                Some("Sign in with the project that owns this round.".into())
            }
            Self::Storage(_) => Some("Try again; the saved data was not changed.".into()),
        }
    }
}
