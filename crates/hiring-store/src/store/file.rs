//! JSON file store: one `round-<id>.json` per round in a directory.
//!
//! Writes go to a temp file that is renamed over the target, so a crash
//! never leaves a half-written record. The file name is the unique key;
//! the read-modify-write of an upsert runs under an in-process lock.
//! Record ids come from a `last-id` counter file in the same directory.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::warn;

use super::SnapshotStore;
use crate::error::{StoreError, StoreResult};
use crate::types::{
    CalcSnapshot, RoundId, SCHEMA_VERSION, SaveOutcome, SnapshotDraft, SnapshotId,
};

const FILE_PREFIX: &str = "round-";
const FILE_EXTENSION: &str = "json";
const COUNTER_FILE: &str = "last-id";

fn io_error(operation: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io {
        operation,
        path,
        source,
    }
}

#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open (and create if needed) a store directory.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            operation: "create directory",
            path: root.clone(),
            source,
        })?;
        Ok(Self {
            root,
            lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, round_id: RoundId) -> PathBuf {
        self.root
            .join(format!("{FILE_PREFIX}{round_id}.{FILE_EXTENSION}"))
    }

    fn read(&self, path: &Path) -> StoreResult<Option<CalcSnapshot>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    operation: "read",
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Deserialization {
                path: path.to_path_buf(),
                source,
            })?;
        let version = value
            .get("schemaVersion")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        if version != SCHEMA_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: version.to_string(),
                expected: SCHEMA_VERSION,
                path: path.to_path_buf(),
            });
        }
        let snapshot =
            serde_json::from_value(value).map_err(|source| StoreError::Deserialization {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Some(snapshot))
    }

    fn write(&self, path: &Path, snapshot: &CalcSnapshot) -> StoreResult<()> {
        let bytes =
            serde_json::to_vec_pretty(snapshot).map_err(|source| StoreError::Serialization {
                round_id: snapshot.round_id,
                source,
            })?;
        write_atomic(path, &bytes)
    }

    fn counter_path(&self) -> PathBuf {
        self.root.join(COUNTER_FILE)
    }

    /// Allocate the id of a newly created record.
    ///
    /// The last issued id lives in its own file. Without one (or if it is
    /// unreadable) the counter is seeded from the records on disk.
    fn next_id(&self) -> StoreResult<SnapshotId> {
        let path = self.counter_path();
        let stored = match fs::read_to_string(&path) {
            Ok(text) => {
                let parsed = text.trim().parse::<SnapshotId>().ok();
                if parsed.is_none() {
                    warn!(path = %path.display(), "id counter unreadable; rescanning records");
                }
                parsed
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(StoreError::Io {
                    operation: "read",
                    path,
                    source,
                });
            }
        };
        let last = match stored {
            Some(last) => last,
            None => self.scan_max_id()?,
        };
        let next = last + 1;
        write_atomic(&path, next.to_string().as_bytes())?;
        Ok(next)
    }

    /// Highest record id present in the directory. Records that cannot be
    /// read are skipped.
    fn scan_max_id(&self) -> StoreResult<SnapshotId> {
        let entries = fs::read_dir(&self.root).map_err(|source| StoreError::Io {
            operation: "list",
            path: self.root.clone(),
            source,
        })?;
        let mut max_id = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            let is_record = path
                .file_name()
                .and_then(std::ffi::OsStr::to_str)
                .is_some_and(|name| {
                    name.starts_with(FILE_PREFIX) && name.ends_with(".json")
                });
            if !is_record {
                continue;
            }
            match self.read(&path) {
                Ok(Some(snapshot)) => max_id = max_id.max(snapshot.id),
                Ok(None) => {}
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping unreadable snapshot record");
                }
            }
        }
        Ok(max_id)
    }
}

/// Write to a sibling temp file, sync, then rename over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);
    let mut file = File::create(&temp_path).map_err(io_error("create", &temp_path))?;
    file.write_all(bytes)
        .map_err(io_error("write", &temp_path))?;
    file.sync_all().map_err(io_error("sync", &temp_path))?;
    fs::rename(&temp_path, path).map_err(io_error("rename", path))?;
    Ok(())
}

impl SnapshotStore for FileStore {
    fn upsert(&self, draft: SnapshotDraft) -> StoreResult<SaveOutcome> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let round_id = draft.round_id;
        let path = self.path_for(round_id);
        let existing = self.read(&path)?;
        let created = existing.is_none();
        let new_id = if created { self.next_id()? } else { 0 };
        let snapshot = draft.into_snapshot(existing.as_ref(), new_id, Utc::now());
        self.write(&path, &snapshot)?;
        tracing::info!(
            round_id,
            created,
            path = %path.display(),
            "saved calculation snapshot"
        );
        Ok(SaveOutcome { snapshot, created })
    }

    fn load(&self, round_id: RoundId) -> StoreResult<Option<CalcSnapshot>> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.read(&self.path_for(round_id))
    }

    fn delete(&self, round_id: RoundId) -> StoreResult<usize> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let path = self.path_for(round_id);
        let removed = match fs::remove_file(&path) {
            Ok(()) => 1,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => 0,
            Err(source) => {
                return Err(StoreError::Io {
                    operation: "delete",
                    path,
                    source,
                });
            }
        };
        tracing::info!(round_id, removed, "deleted calculation snapshot");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use hiring_model::{CalcConfig, StatsSnapshot};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_upsert_and_reload() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("calcs")).unwrap();
        let draft = SnapshotDraft::new(3, Some("분석"), CalcConfig::default(), StatsSnapshot::default());
        let saved = store.upsert(draft).unwrap();
        assert!(saved.created);
        assert_eq!(saved.snapshot.id, 1);
        assert!(store.path_for(3).exists());
        let loaded = store.load(3).unwrap().unwrap();
        assert_eq!(loaded, saved.snapshot);
    }

    #[test]
    fn test_ids_continue_after_existing_records() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let draft = |round_id| {
            SnapshotDraft::new(round_id, None, CalcConfig::default(), StatsSnapshot::default())
        };
        assert_eq!(store.upsert(draft(1)).unwrap().snapshot.id, 1);
        assert_eq!(store.upsert(draft(2)).unwrap().snapshot.id, 2);
        assert_eq!(store.upsert(draft(1)).unwrap().snapshot.id, 1);
        assert_eq!(store.upsert(draft(9)).unwrap().snapshot.id, 3);
    }

    #[test]
    fn test_create_beside_corrupt_record() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        fs::write(store.path_for(4), b"NOT JSON").unwrap();
        fs::write(store.path_for(6), r#"{"schemaVersion": "v9"}"#).unwrap();
        let draft = SnapshotDraft::new(5, None, CalcConfig::default(), StatsSnapshot::default());
        let saved = store.upsert(draft).unwrap();
        assert!(saved.created);
        assert_eq!(saved.snapshot.id, 1);
        assert_eq!(store.load(5).unwrap(), Some(saved.snapshot));
    }

    #[test]
    fn test_ids_come_from_counter_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let draft = |round_id| {
            SnapshotDraft::new(round_id, None, CalcConfig::default(), StatsSnapshot::default())
        };
        assert_eq!(store.upsert(draft(1)).unwrap().snapshot.id, 1);
        assert_eq!(fs::read_to_string(dir.path().join(COUNTER_FILE)).unwrap(), "1");

        // Deleting the newest record does not free its id.
        assert_eq!(store.upsert(draft(2)).unwrap().snapshot.id, 2);
        store.delete(2).unwrap();
        assert_eq!(store.upsert(draft(3)).unwrap().snapshot.id, 3);

        // A damaged counter is rebuilt from the records on disk.
        fs::write(dir.path().join(COUNTER_FILE), "garbage").unwrap();
        assert_eq!(store.upsert(draft(4)).unwrap().snapshot.id, 4);
    }

    #[test]
    fn test_load_unsupported_version() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        fs::write(store.path_for(4), r#"{"schemaVersion": "v9"}"#).unwrap();
        assert!(matches!(
            store.load(4),
            Err(StoreError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        fs::write(store.path_for(4), b"NOT JSON").unwrap();
        assert!(matches!(
            store.load(4),
            Err(StoreError::Deserialization { .. })
        ));
    }

    #[test]
    fn test_delete_reports_count() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.delete(8).unwrap(), 0);
        store
            .upsert(SnapshotDraft::new(8, None, CalcConfig::default(), StatsSnapshot::default()))
            .unwrap();
        assert_eq!(store.delete(8).unwrap(), 1);
        assert_eq!(store.load(8).unwrap(), None);
    }
}
