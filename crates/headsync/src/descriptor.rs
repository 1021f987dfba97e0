//! Head descriptor module

pub mod builder;
pub mod memo;
pub mod model;

pub use builder::{build, Config, DescriptorBuilder};
pub use memo::DescriptorMemo;
pub use model::{HeadDescriptor, TagEntry, TITLE_TEMPLATE};
