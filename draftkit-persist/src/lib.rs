//! Durable draft snapshots for draftkit.
//!
//! An editing session should survive a closed tab. This crate wraps a
//! draft store with a durable key-value slot:
//!
//! - [`SnapshotStore`] — the slot contract; [`SqliteSnapshotStore`] for
//!   real sessions, [`MemorySnapshotStore`] for tests
//! - [`DurableStore`] — one-shot hydration, write-on-mutation, and
//!   baseline reset with a generation counter as the resubscription
//!   signal
//!
//! The draft state itself is any serializable type; in practice a
//! `DraftSlice` or `ParentChildStore` from `draftkit-store`.

mod durable;
mod error;
mod snapshot;
mod sqlite;

pub use durable::DurableStore;
pub use error::{PersistError, PersistResult};
pub use snapshot::{MemorySnapshotStore, SnapshotStore};
pub use sqlite::SqliteSnapshotStore;
