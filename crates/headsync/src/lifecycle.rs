//! Registration lifecycle of one component instance

use crate::descriptor::HeadDescriptor;
use crate::error::Result;
use crate::manager::{EntryHandle, HeadManager};
use std::sync::Arc;
use tracing::{debug, warn};

/// Where a controller is in its registration lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationState {
    /// Holding a live handle
    Registered,
    /// Disposed; terminal
    Unregistered,
}

/// Owns the single registration handle of one mounted component.
///
/// A controller only exists once its descriptor has been pushed, so the
/// transition into `Registered` happens exactly once, in [`on_mount`].
/// After [`on_unmount`] the controller is spent: patches and further
/// unmounts are no-ops. Dropping a registered controller disposes it.
///
/// [`on_mount`]: HeadController::on_mount
/// [`on_unmount`]: HeadController::on_unmount
#[derive(Debug)]
pub struct HeadController<H: EntryHandle> {
    handle: Option<H>,
    submitted: Arc<HeadDescriptor>,
}

impl<H: EntryHandle> HeadController<H> {
    /// Push the initial descriptor and take ownership of the handle
    pub fn on_mount<M>(manager: &M, initial: Arc<HeadDescriptor>) -> Result<Self>
    where
        M: HeadManager<Handle = H> + ?Sized,
    {
        let handle = manager.push(Arc::clone(&initial))?;
        debug!(tags = initial.len(), "head registration created");
        Ok(Self {
            handle: Some(handle),
            submitted: initial,
        })
    }

    /// Patch the registration when `descriptor` is a different allocation
    /// from the one last submitted. Returns whether a patch was sent.
    pub fn on_descriptor_change(&mut self, descriptor: Arc<HeadDescriptor>) -> Result<bool> {
        let Some(handle) = self.handle.as_mut() else {
            debug!("descriptor change without a registration, ignoring");
            return Ok(false);
        };
        if Arc::ptr_eq(&self.submitted, &descriptor) {
            return Ok(false);
        }

        handle.patch(Arc::clone(&descriptor))?;
        self.submitted = descriptor;
        debug!(tags = self.submitted.len(), "head registration patched");
        Ok(true)
    }

    /// Dispose the registration. Safe to call more than once.
    pub fn on_unmount(&mut self) -> Result<()> {
        match self.handle.take() {
            Some(handle) => {
                handle.dispose()?;
                debug!("head registration disposed");
            }
            None => debug!("head registration already disposed"),
        }
        Ok(())
    }

    pub fn state(&self) -> RegistrationState {
        if self.handle.is_some() {
            RegistrationState::Registered
        } else {
            RegistrationState::Unregistered
        }
    }

    pub fn is_registered(&self) -> bool {
        self.state() == RegistrationState::Registered
    }

    /// The descriptor the manager currently holds for this controller
    pub fn submitted(&self) -> &Arc<HeadDescriptor> {
        &self.submitted
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }
}

impl<H: EntryHandle> Drop for HeadController<H> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.dispose() {
                warn!(%err, "failed to dispose head registration on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::build;
    use crate::element::Element;
    use crate::manager::MemoryHead;

    fn titled(title: &str) -> Arc<HeadDescriptor> {
        Arc::new(build(&[Element::new("title").children(title)], None))
    }

    #[test]
    fn test_mount_registers() -> Result<()> {
        let head = MemoryHead::new();
        let controller = HeadController::on_mount(&head, titled("A"))?;
        assert_eq!(controller.state(), RegistrationState::Registered);
        assert_eq!(head.len(), 1);
        Ok(())
    }

    #[test]
    fn test_same_descriptor_is_not_patched() -> Result<()> {
        let head = MemoryHead::new();
        let initial = titled("A");
        let mut controller = HeadController::on_mount(&head, Arc::clone(&initial))?;

        assert!(!controller.on_descriptor_change(initial)?);
        assert_eq!(head.revision(), 1);

        assert!(controller.on_descriptor_change(titled("A"))?);
        assert_eq!(head.revision(), 2);
        Ok(())
    }

    #[test]
    fn test_patch_replaces_registered_descriptor() -> Result<()> {
        let head = MemoryHead::new();
        let mut controller = HeadController::on_mount(&head, titled("A"))?;
        let next = titled("B");
        controller.on_descriptor_change(Arc::clone(&next))?;

        let entries = head.entries();
        assert!(entries.first().is_some_and(|(_, d)| Arc::ptr_eq(d, &next)));
        assert!(Arc::ptr_eq(controller.submitted(), &next));
        Ok(())
    }

    #[test]
    fn test_unmount_is_idempotent() -> Result<()> {
        let head = MemoryHead::new();
        let mut controller = HeadController::on_mount(&head, titled("A"))?;

        controller.on_unmount()?;
        controller.on_unmount()?;
        assert_eq!(controller.state(), RegistrationState::Unregistered);
        assert!(head.is_empty());
        assert_eq!(head.revision(), 2);
        Ok(())
    }

    #[test]
    fn test_change_after_unmount_is_noop() -> Result<()> {
        let head = MemoryHead::new();
        let mut controller = HeadController::on_mount(&head, titled("A"))?;
        controller.on_unmount()?;

        assert!(!controller.on_descriptor_change(titled("B"))?);
        assert!(head.is_empty());
        Ok(())
    }

    #[test]
    fn test_drop_disposes() -> Result<()> {
        let head = MemoryHead::new();
        {
            let _controller = HeadController::on_mount(&head, titled("A"))?;
            assert_eq!(head.len(), 1);
        }
        assert!(head.is_empty());
        Ok(())
    }
}
