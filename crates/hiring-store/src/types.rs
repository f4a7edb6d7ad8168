//! Persisted calculation snapshot.

use chrono::{DateTime, Utc};
use hiring_model::{CalcConfig, StatsSnapshot};
use serde::{Deserialize, Serialize};

pub type RoundId = u64;
pub type ProjectId = u64;
pub type SnapshotId = u64;

/// Schema version written into every record.
pub const SCHEMA_VERSION: &str = "v1";

/// Name used when a save request carries no usable name.
pub const DEFAULT_SNAPSHOT_NAME: &str = "기본 분석";

/// The single stored calculation of an evaluation round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcSnapshot {
    pub id: SnapshotId,
    pub round_id: RoundId,
    pub name: String,
    pub config: CalcConfig,
    pub stats: StatsSnapshot,
    pub schema_version: String,
    pub calculated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Content of a save, before the store assigns identity and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotDraft {
    pub round_id: RoundId,
    pub name: String,
    pub config: CalcConfig,
    pub stats: StatsSnapshot,
}

impl SnapshotDraft {
    pub fn new(
        round_id: RoundId,
        name: Option<&str>,
        config: CalcConfig,
        stats: StatsSnapshot,
    ) -> Self {
        Self {
            round_id,
            name: normalize_name(name),
            config,
            stats,
        }
    }

    /// Turn the draft into a record, replacing `existing` wholesale.
    ///
    /// Only the record id and creation time survive from `existing`.
    pub fn into_snapshot(
        self,
        existing: Option<&CalcSnapshot>,
        new_id: SnapshotId,
        now: DateTime<Utc>,
    ) -> CalcSnapshot {
        let (id, created_at) = match existing {
            Some(previous) => (previous.id, previous.created_at),
            None => (new_id, now),
        };
        CalcSnapshot {
            id,
            round_id: self.round_id,
            name: self.name,
            config: self.config,
            stats: self.stats,
            schema_version: SCHEMA_VERSION.to_string(),
            calculated_at: now,
            created_at,
            updated_at: now,
        }
    }
}

/// Trimmed name, or the default name when blank.
pub fn normalize_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_SNAPSHOT_NAME.to_string(),
    }
}

/// Result of an upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub snapshot: CalcSnapshot,
    /// `true` when no snapshot existed for the round before.
    pub created: bool,
}
