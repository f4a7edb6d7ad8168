use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;

use super::SnapshotStore;
use crate::error::{StoreError, StoreResult};
use crate::types::{CalcSnapshot, RoundId, SaveOutcome, SnapshotDraft, SnapshotId};

#[derive(Debug, Default)]
struct Slots {
    next_id: SnapshotId,
    by_round: BTreeMap<RoundId, CalcSnapshot>,
}

/// In-process store; one slot per round behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<Slots>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().map(|slots| slots.by_round.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for MemoryStore {
    fn upsert(&self, draft: SnapshotDraft) -> StoreResult<SaveOutcome> {
        let mut slots = self.slots.lock().map_err(|_| StoreError::LockPoisoned)?;
        let round_id = draft.round_id;
        let existing = slots.by_round.get(&round_id);
        let created = existing.is_none();
        let new_id = slots.next_id + 1;
        let snapshot = draft.into_snapshot(existing, new_id, Utc::now());
        if created {
            slots.next_id = new_id;
        }
        slots.by_round.insert(round_id, snapshot.clone());
        tracing::info!(round_id, created, "saved calculation snapshot");
        Ok(SaveOutcome { snapshot, created })
    }

    fn load(&self, round_id: RoundId) -> StoreResult<Option<CalcSnapshot>> {
        let slots = self.slots.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(slots.by_round.get(&round_id).cloned())
    }

    fn delete(&self, round_id: RoundId) -> StoreResult<usize> {
        let mut slots = self.slots.lock().map_err(|_| StoreError::LockPoisoned)?;
        let removed = usize::from(slots.by_round.remove(&round_id).is_some());
        tracing::info!(round_id, removed, "deleted calculation snapshot");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use hiring_model::{CalcConfig, CrossGroupSummaryRow, StatsSnapshot};

    use super::*;

    fn draft(round_id: RoundId, group: &str) -> SnapshotDraft {
        let stats = StatsSnapshot {
            cross_group_summary: vec![CrossGroupSummaryRow::empty(group)],
            ..StatsSnapshot::default()
        };
        SnapshotDraft::new(round_id, None, CalcConfig::default(), stats)
    }

    #[test]
    fn ids_are_assigned_per_new_round() {
        let store = MemoryStore::new();
        let a = store.upsert(draft(1, "A")).unwrap();
        let b = store.upsert(draft(2, "B")).unwrap();
        let a2 = store.upsert(draft(1, "C")).unwrap();
        assert!(a.created && b.created && !a2.created);
        assert_eq!(a.snapshot.id, 1);
        assert_eq!(b.snapshot.id, 2);
        assert_eq!(a2.snapshot.id, 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn concurrent_saves_leave_one_record() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.upsert(draft(5, &format!("G{i}"))).unwrap())
            })
            .collect();
        let outcomes: Vec<SaveOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(outcomes.iter().filter(|o| o.created).count(), 1);
        assert_eq!(store.len(), 1);
        let id = store.load(5).unwrap().unwrap().id;
        assert!(outcomes.iter().all(|o| o.snapshot.id == id));
    }
}
