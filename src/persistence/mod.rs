//! Saving and restoring sessions.

mod reconciler;
mod snapshot;
mod store;

pub use reconciler::{ImageRequirement, PersistenceReconciler, RestoredSession};
pub use snapshot::{SESSION_SNAPSHOT_SCHEMA_V1, SessionSnapshotContractV1};
pub use store::{DEFAULT_STORAGE_KEY, FileStore, MemoryStore, SessionStore};
