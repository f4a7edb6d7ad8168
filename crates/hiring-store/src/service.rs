//! Round-scoped snapshot operations with validation and authorization.
//!
//! Every call first checks that the round exists and that the caller's
//! authorization names the project owning it; only then is the request
//! body validated and the store touched.

use std::collections::BTreeMap;

use hiring_model::{CalcConfig, StatsSnapshot};
use serde_json::Value;

use crate::error::CalcError;
use crate::store::SnapshotStore;
use crate::types::{CalcSnapshot, ProjectId, RoundId, SaveOutcome, SnapshotDraft};

/// Lookup of the project that owns a round.
pub trait RoundDirectory {
    fn project_of(&self, round_id: RoundId) -> Option<ProjectId>;
}

impl RoundDirectory for BTreeMap<RoundId, ProjectId> {
    fn project_of(&self, round_id: RoundId) -> Option<ProjectId> {
        self.get(&round_id).copied()
    }
}

/// Project the caller has proven access to; `None` when unauthenticated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub project_id: Option<ProjectId>,
}

impl AuthContext {
    pub fn for_project(project_id: ProjectId) -> Self {
        Self {
            project_id: Some(project_id),
        }
    }
}

/// Validated body of a save request.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveCalcRequest {
    pub name: Option<String>,
    pub config: CalcConfig,
    pub stats: StatsSnapshot,
}

impl SaveCalcRequest {
    /// Validate a raw JSON body `{ name?, config, stats }`.
    ///
    /// `config` and `stats` must both be present JSON objects of the
    /// expected shape; nothing is coerced.
    pub fn from_json(body: &Value) -> Result<Self, CalcError> {
        let Some(object) = body.as_object() else {
            return Err(CalcError::Validation("request body must be a JSON object".into()));
        };
        let config = required_object(object.get("config"), "config")?;
        let stats = required_object(object.get("stats"), "stats")?;
        let name = match object.get("name") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(Value::Number(number)) => Some(number.to_string()),
            Some(_) => {
                return Err(CalcError::Validation("`name` must be a string".into()));
            }
        };
        let config: CalcConfig = serde_json::from_value(config.clone())
            .map_err(|error| CalcError::Validation(format!("`config` is malformed: {error}")))?;
        let stats: StatsSnapshot = serde_json::from_value(stats.clone())
            .map_err(|error| CalcError::Validation(format!("`stats` is malformed: {error}")))?;
        Ok(Self {
            name,
            config,
            stats,
        })
    }
}

fn required_object<'a>(value: Option<&'a Value>, field: &str) -> Result<&'a Value, CalcError> {
    match value {
        Some(value @ Value::Object(_)) => Ok(value),
        Some(Value::Null) | None => Err(CalcError::Validation(format!(
            "`{field}` is required and must be an object"
        ))),
        Some(_) => Err(CalcError::Validation(format!("`{field}` must be an object"))),
    }
}

/// Snapshot operations exposed to the round-management layer.
#[derive(Debug)]
pub struct CalcService<S, R> {
    store: S,
    rounds: R,
}

impl<S: SnapshotStore, R: RoundDirectory> CalcService<S, R> {
    pub fn new(store: S, rounds: R) -> Self {
        Self { store, rounds }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn authorize(&self, auth: AuthContext, round_id: RoundId) -> Result<(), CalcError> {
        let owner = self
            .rounds
            .project_of(round_id)
            .ok_or(CalcError::RoundNotFound(round_id))?;
        if auth.project_id != Some(owner) {
            tracing::warn!(round_id, caller = ?auth.project_id, "rejected snapshot access");
            return Err(CalcError::Forbidden {
                round_id,
                project_id: auth.project_id,
            });
        }
        Ok(())
    }

    /// The saved snapshot; [`CalcError::SnapshotNotFound`] when none exists.
    pub fn get(&self, auth: AuthContext, round_id: RoundId) -> Result<CalcSnapshot, CalcError> {
        self.authorize(auth, round_id)?;
        self.store
            .load(round_id)?
            .ok_or(CalcError::SnapshotNotFound(round_id))
    }

    /// Save from a raw JSON body.
    pub fn put_json(
        &self,
        auth: AuthContext,
        round_id: RoundId,
        body: &Value,
    ) -> Result<SaveOutcome, CalcError> {
        self.authorize(auth, round_id)?;
        let request = SaveCalcRequest::from_json(body)?;
        self.save(round_id, request)
    }

    /// Save an already typed request.
    pub fn put(
        &self,
        auth: AuthContext,
        round_id: RoundId,
        request: SaveCalcRequest,
    ) -> Result<SaveOutcome, CalcError> {
        self.authorize(auth, round_id)?;
        self.save(round_id, request)
    }

    fn save(&self, round_id: RoundId, request: SaveCalcRequest) -> Result<SaveOutcome, CalcError> {
        let draft = SnapshotDraft::new(
            round_id,
            request.name.as_deref(),
            request.config,
            request.stats,
        );
        Ok(self.store.upsert(draft)?)
    }

    /// Delete the snapshot, returning how many records were removed.
    pub fn delete(&self, auth: AuthContext, round_id: RoundId) -> Result<usize, CalcError> {
        self.authorize(auth, round_id)?;
        Ok(self.store.delete(round_id)?)
    }
}
