//! Recompute-on-change cache for built descriptors

use crate::descriptor::builder::DescriptorBuilder;
use crate::descriptor::model::HeadDescriptor;
use crate::element::{filter_elements, Child};
use std::sync::Arc;
use tracing::trace;

/// Caches the last descriptor keyed by the children list identity and the
/// title template value.
///
/// A hit hands back the very same `Arc`, so callers can detect "nothing
/// changed" with [`Arc::ptr_eq`]. The memo holds on to the children `Arc`,
/// which keeps the allocation alive and its address from being reused.
#[derive(Debug, Default)]
pub struct DescriptorMemo {
    children: Option<Arc<[Child]>>,
    title_template: Option<String>,
    descriptor: Option<Arc<HeadDescriptor>>,
}

impl DescriptorMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached descriptor, rebuilding when the children list
    /// reference or the title template changed since the last call.
    pub fn get_or_build(
        &mut self,
        builder: &DescriptorBuilder,
        children: &Arc<[Child]>,
        title_template: Option<&str>,
    ) -> Arc<HeadDescriptor> {
        if let Some(descriptor) = self.cached(children, title_template) {
            trace!("descriptor memo hit");
            return descriptor;
        }

        let elements = filter_elements(children);
        let descriptor = Arc::new(builder.build(&elements, title_template));
        self.children = Some(Arc::clone(children));
        self.title_template = title_template.map(str::to_owned);
        self.descriptor = Some(Arc::clone(&descriptor));
        descriptor
    }

    /// The descriptor produced by the last rebuild, if any
    pub fn current(&self) -> Option<&Arc<HeadDescriptor>> {
        self.descriptor.as_ref()
    }

    fn cached(&self, children: &Arc<[Child]>, title_template: Option<&str>) -> Option<Arc<HeadDescriptor>> {
        let same_children = self
            .children
            .as_ref()
            .is_some_and(|prev| Arc::ptr_eq(prev, children));
        if same_children && self.title_template.as_deref() == title_template {
            self.descriptor.clone()
        } else {
            None
        }
    }
}
