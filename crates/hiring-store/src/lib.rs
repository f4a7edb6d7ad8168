//! Persistence of per-round calculation snapshots.
//!
//! Each evaluation round has zero or one saved calculation: the engine
//! configuration plus the statistics computed from it. Saving replaces the
//! previous record wholesale; there is no history.
//!
//! # Record shape
//!
//! ```text
//! { id, roundId, name, config, stats, schemaVersion: "v1",
//!   calculatedAt, createdAt, updatedAt }
//! ```
//!
//! # Architecture
//!
//! - `types.rs` - the record and the save draft
//! - `store/` - [`SnapshotStore`] with in-memory and JSON-file backends
//! - `service.rs` - [`CalcService`]: round lookup, authorization and
//!   request validation in front of a store
//! - `error.rs` - [`StoreError`] and [`CalcError`]

mod error;
mod service;
mod store;
mod types;

pub use error::{CalcError, StoreError, StoreResult};
pub use service::{AuthContext, CalcService, RoundDirectory, SaveCalcRequest};
pub use store::{FileStore, MemoryStore, SnapshotStore};
pub use types::{
    CalcSnapshot, DEFAULT_SNAPSHOT_NAME, ProjectId, RoundId, SCHEMA_VERSION, SaveOutcome,
    SnapshotDraft, SnapshotId, normalize_name,
};
