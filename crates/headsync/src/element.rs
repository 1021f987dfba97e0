//! Framework child elements as seen by the head component

use crate::value::{Props, Value};

/// Property that carries an element's nested children
pub const CHILDREN_PROP: &str = "children";

/// A framework element: a tag identifier plus its property bag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    tag: String,
    props: Props,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Props::new(),
        }
    }

    pub fn with_props(tag: impl Into<String>, props: Props) -> Self {
        Self {
            tag: tag.into(),
            props,
        }
    }

    /// Sets a property, replacing any earlier value for the same key
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Sets the `children` property
    #[must_use]
    pub fn children(self, children: impl Into<Value>) -> Self {
        self.prop(CHILDREN_PROP, children)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn props(&self) -> &Props {
        &self.props
    }
}

/// One slot in a component's children list
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Element(Element),
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl Child {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// Keeps only element-typed children, in document order.
///
/// Text, numbers, booleans and null are dropped here so the descriptor
/// builder only ever sees elements.
pub fn filter_elements(children: &[Child]) -> Vec<Element> {
    children
        .iter()
        .filter_map(Child::as_element)
        .cloned()
        .collect()
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{Child, Element};
    use crate::value::Props;
    use serde::de::{Deserialize, Deserializer};

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum RawChild {
        Element {
            #[serde(rename = "type")]
            tag: String,
            #[serde(default)]
            props: Props,
        },
        Text(String),
        Number(f64),
        Bool(bool),
        Null(()),
    }

    impl<'de> Deserialize<'de> for Child {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(match RawChild::deserialize(deserializer)? {
                RawChild::Element { tag, props } => Self::Element(Element::with_props(tag, props)),
                RawChild::Text(text) => Self::Text(text),
                RawChild::Number(n) => Self::Number(n),
                RawChild::Bool(b) => Self::Bool(b),
                RawChild::Null(()) => Self::Null,
            })
        }
    }
}
