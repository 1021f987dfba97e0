//! In-memory head manager

use crate::descriptor::HeadDescriptor;
use crate::error::{EntryId, Error, Result};
use crate::manager::{EntryHandle, HeadManager};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    revision: u64,
    entries: IndexMap<EntryId, Arc<HeadDescriptor>>,
}

/// Head manager that keeps registered descriptors in memory.
///
/// Entries are kept in registration order. Cloning shares the same
/// registry, so one `MemoryHead` can serve many components. No merging or
/// deduplication happens here; `entries` returns the raw contributions.
#[derive(Debug, Clone, Default)]
pub struct MemoryHead {
    registry: Arc<Mutex<Registry>>,
}

impl MemoryHead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of live entries in registration order
    pub fn entries(&self) -> Vec<(EntryId, Arc<HeadDescriptor>)> {
        self.registry
            .lock()
            .entries
            .iter()
            .map(|(id, d)| (*id, Arc::clone(d)))
            .collect()
    }

    pub fn get(&self, id: EntryId) -> Option<Arc<HeadDescriptor>> {
        self.registry.lock().entries.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.registry.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.lock().entries.is_empty()
    }

    /// Counter bumped by every push, patch and dispose
    pub fn revision(&self) -> u64 {
        self.registry.lock().revision
    }
}

impl HeadManager for MemoryHead {
    type Handle = MemoryEntry;

    fn push(&self, descriptor: Arc<HeadDescriptor>) -> Result<MemoryEntry> {
        let mut registry = self.registry.lock();
        let id = EntryId(registry.next_id);
        registry.next_id += 1;
        registry.revision += 1;
        registry.entries.insert(id, descriptor);
        debug!(%id, "head entry pushed");

        Ok(MemoryEntry {
            id,
            registry: Arc::clone(&self.registry),
        })
    }
}

/// Handle to one [`MemoryHead`] entry
#[derive(Debug)]
pub struct MemoryEntry {
    id: EntryId,
    registry: Arc<Mutex<Registry>>,
}

impl MemoryEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }
}

impl EntryHandle for MemoryEntry {
    fn patch(&mut self, descriptor: Arc<HeadDescriptor>) -> Result<()> {
        let mut registry = self.registry.lock();
        let slot = registry
            .entries
            .get_mut(&self.id)
            .ok_or_else(|| Error::entry_not_found(self.id))?;
        *slot = descriptor;
        registry.revision += 1;
        debug!(id = %self.id, "head entry patched");
        Ok(())
    }

    fn dispose(self) -> Result<()> {
        let mut registry = self.registry.lock();
        registry
            .entries
            .shift_remove(&self.id)
            .ok_or_else(|| Error::entry_not_found(self.id))?;
        registry.revision += 1;
        debug!(id = %self.id, "head entry disposed");
        Ok(())
    }
}
