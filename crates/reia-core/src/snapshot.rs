//! Session-scoped snapshot storage.
//!
//! One slot holding the latest analysis response body verbatim. The
//! submission flow is the only writer, the report view the only reader, and
//! each successful analysis overwrites the slot wholesale. The slot lives for
//! the process session; there is no expiry or persistence.

use std::sync::RwLock;

/// The single analysis snapshot slot.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    slot: RwLock<Option<String>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a new raw response body.
    pub fn store(&self, raw: impl Into<String>) {
        let mut slot = self.slot.write().expect("snapshot lock poisoned");
        *slot = Some(raw.into());
    }

    /// Read the current snapshot, if any.
    pub fn load_raw(&self) -> Option<String> {
        self.slot.read().expect("snapshot lock poisoned").clone()
    }

    /// Drop the current snapshot.
    pub fn clear(&self) {
        let mut slot = self.slot.write().expect("snapshot lock poisoned");
        *slot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.slot.read().expect("snapshot lock poisoned").is_none()
    }
}
