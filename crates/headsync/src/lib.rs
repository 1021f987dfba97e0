//! headsync - keep declarative head elements registered with a head manager
//!
//! A `<Head>` component receives elements such as `title`, `meta` or
//! `script` as children. This crate turns those children into a normalized
//! [`HeadDescriptor`] and keeps exactly one registration of it alive with a
//! [`HeadManager`] for as long as the component is mounted.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use headsync::{Child, Element, Head, MemoryHead};
//! # fn main() -> Result<(), headsync::Error> {
//! let manager = MemoryHead::new();
//! let mut head = Head::new(manager.clone());
//!
//! let children: Arc<[Child]> = Arc::from(vec![
//!     Child::from(Element::new("title").children("Home")),
//!     Child::from(Element::new("meta").prop("name", "description").prop("content", "Hi")),
//! ]);
//! head.render(&children, Some("%s | Site"))?;
//! head.commit()?;
//! assert_eq!(manager.len(), 1);
//!
//! head.unmount()?;
//! assert!(manager.is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{EntryId, Error, ErrorKind, Result};

pub mod value;
pub use value::{Props, Value};

pub mod element;
pub use element::{filter_elements, Child, Element};

pub mod tags;
pub use tags::TagSets;

pub mod descriptor;
pub use descriptor::{
    build, Config, DescriptorBuilder, DescriptorMemo, HeadDescriptor, TagEntry,
};

pub mod manager;
pub use manager::{EntryHandle, HeadManager, MemoryEntry, MemoryHead};

pub mod lifecycle;
pub use lifecycle::{HeadController, RegistrationState};

pub mod component;
pub use component::Head;
