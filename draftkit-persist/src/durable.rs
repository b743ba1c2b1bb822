//! Durable drafts with one-shot hydration.

use crate::{PersistError, PersistResult, SnapshotStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// A draft store wrapped with a durable snapshot slot.
///
/// Two states: not-hydrated (the slot, if any, has not been loaded) and
/// hydrated (loaded, or confirmed absent). The transition happens exactly
/// once per instance, via [`hydrate`](Self::hydrate). Until then the
/// in-memory state is just the server seed and must not be trusted for
/// persistence-dependent rendering — and mutations are refused, so a
/// half-initialized session cannot overwrite a surviving draft.
///
/// Every committed mutation writes the serialized state back to the slot;
/// an interrupted session resumes from where it left off.
pub struct DurableStore<S> {
    store_id: String,
    state: S,
    /// Server snapshot captured at construction; what `reset` restores.
    baseline: S,
    hydrated: bool,
    generation: u64,
    slot: Arc<dyn SnapshotStore>,
}

impl<S> DurableStore<S>
where
    S: Serialize + DeserializeOwned + Clone,
{
    /// Creates a store over the server-seeded state and a snapshot slot.
    pub fn new(store_id: impl Into<String>, initial: S, slot: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store_id: store_id.into(),
            baseline: initial.clone(),
            state: initial,
            hydrated: false,
            generation: 0,
            slot,
        }
    }

    /// Loads the durable snapshot into memory, once.
    ///
    /// Returns true if a snapshot was found and restored. Subsequent calls
    /// are no-ops. A snapshot that no longer deserializes (schema drift
    /// across app versions) is discarded with a warning and the slot is
    /// cleared; the session starts from the server seed.
    pub fn hydrate(&mut self) -> PersistResult<bool> {
        if self.hydrated {
            return Ok(false);
        }
        self.hydrated = true;

        let Some(payload) = self.slot.load(&self.store_id)? else {
            return Ok(false);
        };
        match serde_json::from_slice(&payload) {
            Ok(state) => {
                self.state = state;
                info!(store_id = %self.store_id, "restored draft from snapshot");
                Ok(true)
            }
            Err(err) => {
                warn!(store_id = %self.store_id, %err, "discarding unreadable draft snapshot");
                self.slot.clear(&self.store_id)?;
                Ok(false)
            }
        }
    }

    /// True once [`hydrate`](Self::hydrate) has run. Gates first paint of
    /// persistence-dependent views.
    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// The caller-supplied slot key.
    #[must_use]
    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// Bumped by [`reset`](Self::reset); dependent views subscribe to this
    /// to notice that the state object was replaced wholesale.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The in-memory draft state.
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutable access to the draft state, for flows that cannot run under
    /// [`mutate`](Self::mutate) (an async commit holding the borrow across
    /// an await). Refused before hydration. The caller must follow up with
    /// [`persist`](Self::persist) or [`mark_synced`](Self::mark_synced).
    pub fn state_mut(&mut self) -> PersistResult<&mut S> {
        if !self.hydrated {
            return Err(PersistError::NotHydrated);
        }
        Ok(&mut self.state)
    }

    /// Applies a mutation and writes the resulting state to the slot.
    /// Refused before hydration.
    pub fn mutate<T>(&mut self, apply: impl FnOnce(&mut S) -> T) -> PersistResult<T> {
        if !self.hydrated {
            return Err(PersistError::NotHydrated);
        }
        let out = apply(&mut self.state);
        self.persist()?;
        Ok(out)
    }

    /// Writes the current state to the slot.
    pub fn persist(&self) -> PersistResult<()> {
        let payload = serde_json::to_vec(&self.state)?;
        self.slot.save(&self.store_id, &payload)
    }

    /// Records that the draft was reconciled: the current state becomes
    /// the new baseline and the slot is cleared so the settled draft does
    /// not resurrect in the next session.
    pub fn mark_synced(&mut self) -> PersistResult<()> {
        self.baseline = self.state.clone();
        self.slot.clear(&self.store_id)
    }

    /// Discards all drafts: restores the baseline captured at
    /// construction (or at the last [`mark_synced`](Self::mark_synced)),
    /// clears the slot, and bumps the generation.
    pub fn reset(&mut self) -> PersistResult<()> {
        self.state = self.baseline.clone();
        self.slot.clear(&self.store_id)?;
        self.generation += 1;
        info!(store_id = %self.store_id, generation = self.generation, "draft reset");
        Ok(())
    }
}
