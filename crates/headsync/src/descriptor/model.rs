//! Head descriptor value submitted to the head manager

use crate::value::Props;
use indexmap::IndexMap;

/// Wire key of the title template
pub const TITLE_TEMPLATE: &str = "titleTemplate";

/// The registration payload for one tag identifier
#[derive(Debug, Clone, PartialEq)]
pub enum TagEntry {
    /// Singleton tag: the last declared bag
    Single(Props),
    /// Collection tag: every declared bag, in declaration order
    Many(Vec<Props>),
}

impl TagEntry {
    pub fn as_single(&self) -> Option<&Props> {
        match self {
            Self::Single(props) => Some(props),
            Self::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[Props]> {
        match self {
            Self::Many(items) => Some(items),
            Self::Single(_) => None,
        }
    }

    /// Iterates the bags regardless of shape
    pub fn bags(&self) -> impl Iterator<Item = &Props> {
        let (single, many) = match self {
            Self::Single(props) => (Some(props), &[][..]),
            Self::Many(items) => (None, items.as_slice()),
        };
        single.into_iter().chain(many)
    }
}

/// Normalized head state one component contributes.
///
/// Built fresh on every rebuild and never mutated once handed out; the
/// lifecycle code shares it as `Arc<HeadDescriptor>` and treats a new
/// allocation as a change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadDescriptor {
    title_template: Option<String>,
    tags: IndexMap<String, TagEntry>,
}

impl HeadDescriptor {
    pub(crate) fn new(title_template: Option<String>) -> Self {
        Self {
            title_template,
            tags: IndexMap::new(),
        }
    }

    /// Appends a bag to a collection tag's sequence
    pub(crate) fn append(&mut self, tag: &str, props: Props) {
        match self.tags.get_mut(tag) {
            Some(TagEntry::Many(items)) => items.push(props),
            _ => {
                self.tags.insert(tag.to_owned(), TagEntry::Many(vec![props]));
            }
        }
    }

    /// Sets a singleton tag, replacing an earlier bag for the same tag
    pub(crate) fn assign(&mut self, tag: &str, props: Props) {
        self.tags.insert(tag.to_owned(), TagEntry::Single(props));
    }

    pub fn title_template(&self) -> Option<&str> {
        self.title_template.as_deref()
    }

    pub fn get(&self, tag: &str) -> Option<&TagEntry> {
        self.tags.get(tag)
    }

    pub fn single(&self, tag: &str) -> Option<&Props> {
        self.get(tag).and_then(TagEntry::as_single)
    }

    pub fn many(&self, tag: &str) -> Option<&[Props]> {
        self.get(tag).and_then(TagEntry::as_many)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Tag identifiers in first-declaration order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &TagEntry)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of tag identifiers present (the template is not counted)
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.title_template.is_none()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{HeadDescriptor, TagEntry, TITLE_TEMPLATE};
    use serde::ser::{Serialize, SerializeMap, Serializer};

    impl Serialize for TagEntry {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Single(props) => props.serialize(serializer),
                Self::Many(items) => items.serialize(serializer),
            }
        }
    }

    impl Serialize for HeadDescriptor {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            // A declared `titleTemplate` element replaces the template option
            // on the wire, the same key cannot be written twice.
            let template = self
                .title_template
                .as_ref()
                .filter(|_| !self.tags.contains_key(TITLE_TEMPLATE));
            let len = self.tags.len() + usize::from(template.is_some());

            let mut map = serializer.serialize_map(Some(len))?;
            if let Some(template) = template {
                map.serialize_entry(TITLE_TEMPLATE, template)?;
            }
            for (tag, entry) in &self.tags {
                map.serialize_entry(tag, entry)?;
            }
            map.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(key: &str, value: &str) -> Props {
        [(key, value)].into_iter().collect()
    }

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let mut d = HeadDescriptor::new(None);
        d.append("meta", bag("name", "a"));
        d.append("meta", bag("name", "a"));
        d.append("meta", bag("name", "b"));

        let metas = d.many("meta").unwrap_or_default();
        assert_eq!(metas.len(), 3);
        assert_eq!(metas.last(), Some(&bag("name", "b")));
        assert!(d.single("meta").is_none());
    }

    #[test]
    fn test_assign_last_wins() {
        let mut d = HeadDescriptor::new(None);
        d.assign("base", bag("href", "/a/"));
        d.assign("base", bag("href", "/b/"));

        assert_eq!(d.single("base"), Some(&bag("href", "/b/")));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_bags_iterates_both_shapes() {
        let single = TagEntry::Single(bag("href", "/"));
        assert_eq!(single.bags().count(), 1);

        let many = TagEntry::Many(vec![bag("a", "1"), bag("b", "2")]);
        assert_eq!(many.bags().count(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(HeadDescriptor::default().is_empty());
        assert!(!HeadDescriptor::new(Some("%s".to_owned())).is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_wire_shape() -> Result<(), serde_json::Error> {
        let mut d = HeadDescriptor::new(Some("%s | Site".to_owned()));
        d.assign("title", bag("textContent", "Home"));
        d.append("meta", bag("name", "a"));

        let json = serde_json::to_string(&d)?;
        assert_eq!(
            json,
            r#"{"titleTemplate":"%s | Site","title":{"textContent":"Home"},"meta":[{"name":"a"}]}"#
        );
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_template_element_wins_on_wire() -> Result<(), serde_json::Error> {
        let mut d = HeadDescriptor::new(Some("%s | Option".to_owned()));
        d.assign(TITLE_TEMPLATE, bag("textContent", "%s | Element"));

        let json = serde_json::to_string(&d)?;
        assert_eq!(json, r#"{"titleTemplate":{"textContent":"%s | Element"}}"#);
        Ok(())
    }
}
