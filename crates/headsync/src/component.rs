//! The `Head` component: builder, memo and lifecycle wired to host phases

use crate::descriptor::{DescriptorBuilder, DescriptorMemo, HeadDescriptor};
use crate::element::Child;
use crate::error::Result;
use crate::lifecycle::HeadController;
use crate::manager::HeadManager;
use std::sync::Arc;
use tracing::debug;

/// One mounted `<Head>` instance.
///
/// The host drives it through three phases:
///
/// - [`render`](Self::render) during render evaluation. The first call pushes
///   the descriptor synchronously so head state exists before the pass is
///   committed or serialized; later calls only schedule a patch.
/// - [`commit`](Self::commit) after the pass is committed. Runs the scheduled
///   patch, if the descriptor changed.
/// - [`unmount`](Self::unmount) on teardown. Drops a scheduled patch and
///   disposes the registration.
pub struct Head<M: HeadManager> {
    manager: M,
    builder: DescriptorBuilder,
    memo: DescriptorMemo,
    controller: Option<HeadController<M::Handle>>,
    pending: Option<Arc<HeadDescriptor>>,
    unmounted: bool,
}

impl<M: HeadManager> Head<M> {
    pub fn new(manager: M) -> Self {
        Self::with_builder(manager, DescriptorBuilder::new())
    }

    pub fn with_builder(manager: M, builder: DescriptorBuilder) -> Self {
        Self {
            manager,
            builder,
            memo: DescriptorMemo::new(),
            controller: None,
            pending: None,
            unmounted: false,
        }
    }

    /// Render pass with the component's current children and template
    pub fn render(&mut self, children: &Arc<[Child]>, title_template: Option<&str>) -> Result<()> {
        if self.unmounted {
            debug!("render after unmount, ignoring");
            return Ok(());
        }

        let descriptor = self
            .memo
            .get_or_build(&self.builder, children, title_template);

        let unchanged = self
            .controller
            .as_ref()
            .map(|controller| Arc::ptr_eq(controller.submitted(), &descriptor));
        match unchanged {
            None => {
                self.controller = Some(HeadController::on_mount(&self.manager, descriptor)?);
            }
            Some(true) => self.pending = None,
            Some(false) => self.pending = Some(descriptor),
        }
        Ok(())
    }

    /// Post-commit effect: patch the registration with the latest descriptor
    pub fn commit(&mut self) -> Result<()> {
        let Some(descriptor) = self.pending.take() else {
            return Ok(());
        };
        match self.controller.as_mut() {
            Some(controller) => {
                controller.on_descriptor_change(descriptor)?;
            }
            None => debug!("commit without a registration, ignoring"),
        }
        Ok(())
    }

    /// Teardown: cancel any scheduled patch and dispose the registration
    pub fn unmount(&mut self) -> Result<()> {
        self.unmounted = true;
        if self.pending.take().is_some() {
            debug!("pending head patch cancelled by unmount");
        }
        match self.controller.as_mut() {
            Some(controller) => controller.on_unmount(),
            None => Ok(()),
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.unmounted && self.controller.as_ref().is_some_and(HeadController::is_registered)
    }

    /// Whether a patch is waiting for the next commit
    pub fn has_pending_patch(&self) -> bool {
        self.pending.is_some()
    }

    /// Descriptor built by the most recent render
    pub fn descriptor(&self) -> Option<&Arc<HeadDescriptor>> {
        self.memo.current()
    }

    pub fn controller(&self) -> Option<&HeadController<M::Handle>> {
        self.controller.as_ref()
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }
}
