//! Contract with the external head manager

pub mod memory;

pub use memory::{MemoryEntry, MemoryHead};

use crate::descriptor::HeadDescriptor;
use crate::error::Result;
use std::sync::Arc;

/// A head-state manager that aggregates descriptors from many components
pub trait HeadManager {
    type Handle: EntryHandle;

    /// Register a descriptor; the handle stays valid until disposed
    fn push(&self, descriptor: Arc<HeadDescriptor>) -> Result<Self::Handle>;
}

/// One live registration with a [`HeadManager`]
pub trait EntryHandle {
    /// Replace the descriptor registered through this handle
    fn patch(&mut self, descriptor: Arc<HeadDescriptor>) -> Result<()>;

    /// Remove this registration's contribution. Consumes the handle, so a
    /// handle can be disposed at most once.
    fn dispose(self) -> Result<()>;
}

impl<M: HeadManager + ?Sized> HeadManager for &M {
    type Handle = M::Handle;

    fn push(&self, descriptor: Arc<HeadDescriptor>) -> Result<Self::Handle> {
        (**self).push(descriptor)
    }
}

impl<M: HeadManager + ?Sized> HeadManager for Arc<M> {
    type Handle = M::Handle;

    fn push(&self, descriptor: Arc<HeadDescriptor>) -> Result<Self::Handle> {
        (**self).push(descriptor)
    }
}
