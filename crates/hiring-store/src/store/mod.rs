//! Snapshot storage backends.
//!
//! A store is a map keyed uniquely by round id. `upsert` is the only write
//! that creates records and performs its read-modify-write under the
//! store's own lock, so two concurrent saves for one round can never leave
//! two records behind; the later save wins.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreResult;
use crate::types::{CalcSnapshot, RoundId, SaveOutcome, SnapshotDraft};

pub trait SnapshotStore: Send + Sync {
    /// Create or fully replace the snapshot of `draft.round_id`.
    fn upsert(&self, draft: SnapshotDraft) -> StoreResult<SaveOutcome>;

    /// The snapshot of a round, `None` when nothing was saved.
    fn load(&self, round_id: RoundId) -> StoreResult<Option<CalcSnapshot>>;

    /// Remove the snapshot of a round, returning how many records were
    /// removed (0 or 1).
    fn delete(&self, round_id: RoundId) -> StoreResult<usize>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn upsert(&self, draft: SnapshotDraft) -> StoreResult<SaveOutcome> {
        (**self).upsert(draft)
    }

    fn load(&self, round_id: RoundId) -> StoreResult<Option<CalcSnapshot>> {
        (**self).load(round_id)
    }

    fn delete(&self, round_id: RoundId) -> StoreResult<usize> {
        (**self).delete(round_id)
    }
}
