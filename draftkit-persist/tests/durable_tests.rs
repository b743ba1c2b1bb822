use draftkit_model::Dictionary;
use draftkit_persist::{DurableStore, MemorySnapshotStore, PersistError, SnapshotStore};
use draftkit_store::DraftSlice;
use draftkit_types::{LocalizedText, RecordId};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn dict(id: u64, code: &str) -> Dictionary {
    Dictionary::new(RecordId::Serial(id), code)
        .with_name(LocalizedText::new().with("en", code.to_lowercase()))
}

fn seed() -> DraftSlice<Dictionary> {
    DraftSlice::seeded([dict(1, "AREA")])
}

#[test]
fn mutations_are_refused_before_hydration() {
    let slot = Arc::new(MemorySnapshotStore::new());
    let mut store = DurableStore::new("dicts", seed(), slot);

    assert!(!store.is_hydrated());
    let err = store.mutate(|s| s.remove(RecordId::Serial(1))).unwrap_err();
    assert!(matches!(err, PersistError::NotHydrated));
    assert!(store.state_mut().is_err());
    assert_eq!(store.state().len(), 1);
}

#[test]
fn hydrate_confirms_absent_slot() {
    let slot = Arc::new(MemorySnapshotStore::new());
    let mut store = DurableStore::new("dicts", seed(), slot);

    assert!(!store.hydrate().unwrap());
    assert!(store.is_hydrated());
    assert_eq!(store.state().len(), 1);
}

#[test]
fn hydrate_is_one_shot() {
    let slot = Arc::new(MemorySnapshotStore::new());

    let mut first = DurableStore::new("dicts", seed(), Arc::clone(&slot) as Arc<_>);
    first.hydrate().unwrap();
    first
        .mutate(|s| {
            s.add(|id| Dictionary::new(id, "NEW").with_name(LocalizedText::new().with("en", "New")))
        })
        .unwrap();

    let mut second = DurableStore::new("dicts", seed(), slot);
    assert!(second.hydrate().unwrap());
    // a second hydrate does not reload, even though the slot has data
    assert!(!second.hydrate().unwrap());
}

#[test]
fn an_interrupted_session_resumes_from_the_slot() {
    let slot = Arc::new(MemorySnapshotStore::new());

    let mut session = DurableStore::new("dicts", seed(), Arc::clone(&slot) as Arc<_>);
    session.hydrate().unwrap();
    let draft_id = session
        .mutate(|s| {
            s.add(|id| Dictionary::new(id, "NEW").with_name(LocalizedText::new().with("en", "New")))
        })
        .unwrap();
    session
        .mutate(|s| s.remove(RecordId::Serial(1)))
        .unwrap();
    drop(session);

    // same store id, fresh server seed — the draft wins
    let mut resumed = DurableStore::new("dicts", seed(), slot);
    assert!(resumed.hydrate().unwrap());
    let state = resumed.state();
    assert!(state.contains(draft_id));
    assert_eq!(state.deleted_ids(), &[RecordId::Serial(1)]);
    assert!(state.is_dirty());

    // the restored allocator does not re-mint the draft's id
    let next = resumed
        .mutate(|s| s.add(|id| Dictionary::new(id, "NEXT")))
        .unwrap();
    assert_eq!(next, RecordId::Draft(-2));
}

#[test]
fn unreadable_snapshot_is_discarded() {
    let slot = Arc::new(MemorySnapshotStore::new());
    slot.save("dicts", b"{ not json").unwrap();

    let mut store = DurableStore::new("dicts", seed(), Arc::clone(&slot) as Arc<_>);
    assert!(!store.hydrate().unwrap());
    assert_eq!(store.state().len(), 1);
    assert!(!slot.contains("dicts"));
}

#[test]
fn every_committed_mutation_writes_the_slot() {
    let slot = Arc::new(MemorySnapshotStore::new());
    let mut store = DurableStore::new("dicts", seed(), Arc::clone(&slot) as Arc<_>);
    store.hydrate().unwrap();
    assert!(!slot.contains("dicts"));

    store
        .mutate(|s| s.update(RecordId::Serial(1), |d| d.code = "EDITED".into()))
        .unwrap();
    assert!(slot.contains("dicts"));
}

#[test]
fn mark_synced_clears_the_slot_and_rebaselines() {
    let slot = Arc::new(MemorySnapshotStore::new());
    let mut store = DurableStore::new("dicts", seed(), Arc::clone(&slot) as Arc<_>);
    store.hydrate().unwrap();
    store
        .mutate(|s| s.update(RecordId::Serial(1), |d| d.code = "EDITED".into()))
        .unwrap();

    store.mark_synced().unwrap();
    assert!(!slot.contains("dicts"));

    // reset now restores the synced state, not the original seed
    store.reset().unwrap();
    assert_eq!(store.state().get(RecordId::Serial(1)).unwrap().code, "EDITED");
}

#[test]
fn reset_restores_the_baseline_and_signals_resubscription() {
    let slot = Arc::new(MemorySnapshotStore::new());
    let mut store = DurableStore::new("dicts", seed(), Arc::clone(&slot) as Arc<_>);
    store.hydrate().unwrap();
    assert_eq!(store.generation(), 0);

    store
        .mutate(|s| {
            s.remove(RecordId::Serial(1));
            s.add(|id| Dictionary::new(id, "NEW"));
        })
        .unwrap();

    store.reset().unwrap();

    assert_eq!(store.generation(), 1);
    assert!(!slot.contains("dicts"));
    let state = store.state();
    assert_eq!(state.len(), 1);
    assert!(state.contains(RecordId::Serial(1)));
    assert!(state.deleted_ids().is_empty());
    assert!(!state.is_dirty());
}

#[test]
fn state_mut_with_explicit_persist() {
    let slot = Arc::new(MemorySnapshotStore::new());
    let mut store = DurableStore::new("dicts", seed(), Arc::clone(&slot) as Arc<_>);
    store.hydrate().unwrap();

    store
        .state_mut()
        .unwrap()
        .update(RecordId::Serial(1), |d| d.code = "EDITED".into());
    assert!(!slot.contains("dicts"));

    store.persist().unwrap();
    assert!(slot.contains("dicts"));
}
