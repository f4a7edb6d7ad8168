//! Load a round's inputs, compute its statistics and reach its saved
//! snapshot.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use hiring_ingest::{RoundConfig, RowTable, fingerprint_rows, load_round_config, read_rows};
use hiring_model::{CalcConfig, StatsSnapshot};
use hiring_stats::compute_from_config;
use hiring_store::{
    AuthContext, CalcSnapshot, CalcService, FileStore, ProjectId, RoundId, SaveCalcRequest,
};
use tracing::{info_span, warn};

/// Round directory of the CLI: the single round named by the config file.
pub type SingleRound = BTreeMap<RoundId, ProjectId>;

/// A round configuration together with the rows it applies to.
#[derive(Debug, Clone)]
pub struct LoadedRound {
    pub config: RoundConfig,
    pub table: RowTable,
    pub fingerprint: String,
}

impl LoadedRound {
    /// Engine configuration stamped with the row fingerprint.
    pub fn calc_config(&self) -> CalcConfig {
        self.config.to_calc_config(Some(self.fingerprint.clone()))
    }

    pub fn compute(&self) -> StatsSnapshot {
        compute_from_config(&self.table.rows, &self.calc_config())
    }

    /// Save request for the computed statistics. An explicit `name`
    /// overrides the name in the config file.
    pub fn save_request(&self, name: Option<&str>) -> SaveCalcRequest {
        let config = self.calc_config();
        let stats = compute_from_config(&self.table.rows, &config);
        SaveCalcRequest {
            name: name.map(str::to_string).or_else(|| self.config.name.clone()),
            config,
            stats,
        }
    }
}

/// Read the config and the rows, reporting configuration problems as
/// warnings.
pub fn load_round(rows_path: &Path, config_path: &Path) -> Result<LoadedRound> {
    let span = info_span!("load_round", rows = %rows_path.display());
    let _guard = span.enter();
    let config = load_round_config(config_path)
        .with_context(|| format!("load round config {}", config_path.display()))?;
    let table =
        read_rows(rows_path).with_context(|| format!("read rows {}", rows_path.display()))?;
    for note in config.lint(&table) {
        warn!(round_id = config.round_id, "{note}");
    }
    let fingerprint = fingerprint_rows(&table);
    Ok(LoadedRound {
        config,
        table,
        fingerprint,
    })
}

/// Read only the config of a round.
pub fn load_config(config_path: &Path) -> Result<RoundConfig> {
    load_round_config(config_path)
        .with_context(|| format!("load round config {}", config_path.display()))
}

/// Snapshot service over a file store, knowing only the configured round.
pub fn open_service(store_dir: &Path, config: &RoundConfig) -> Result<CalcService<FileStore, SingleRound>> {
    let store = FileStore::open(store_dir)
        .with_context(|| format!("open snapshot store {}", store_dir.display()))?;
    let rounds = SingleRound::from([(config.round_id, config.project_id)]);
    Ok(CalcService::new(store, rounds))
}

/// Caller identity: the explicit project if given, else the round's owner.
pub fn auth_for(config: &RoundConfig, project: Option<ProjectId>) -> AuthContext {
    AuthContext::for_project(project.unwrap_or(config.project_id))
}

/// Whether a stored snapshot was computed from a given row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Current,
    Stale,
    /// The snapshot carries no fingerprint.
    Unknown,
}

pub fn freshness(snapshot: &CalcSnapshot, table: &RowTable) -> Freshness {
    match snapshot.config.source_fingerprint.as_deref() {
        None => Freshness::Unknown,
        Some(stored) if stored == fingerprint_rows(table) => Freshness::Current,
        Some(_) => Freshness::Stale,
    }
}
