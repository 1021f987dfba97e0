//! Head tag classification tables

use std::collections::HashSet;
use std::sync::LazyLock;

/// Content field for `script` tags (raw markup)
pub const INNER_HTML: &str = "innerHTML";
/// Content field for every other tag with inner content
pub const TEXT_CONTENT: &str = "textContent";

static UNHEAD: LazyLock<TagSets> = LazyLock::new(TagSets::unhead);

/// Static lookup tables deciding how each tag identifier is treated.
///
/// `inner_content` and `element` are expected to be subsets of `valid`.
/// A valid tag outside `element` is a singleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSets {
    valid: HashSet<String>,
    inner_content: HashSet<String>,
    element: HashSet<String>,
}

impl Default for TagSets {
    fn default() -> Self {
        Self::shared().clone()
    }
}

impl TagSets {
    /// Builds tables from explicit tag lists
    pub fn new<'a>(
        valid: impl IntoIterator<Item = &'a str>,
        inner_content: impl IntoIterator<Item = &'a str>,
        element: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            valid: to_set(valid),
            inner_content: to_set(inner_content),
            element: to_set(element),
        }
    }

    /// The tables the unhead head manager registers payloads against
    pub fn unhead() -> Self {
        Self::new(
            [
                "title",
                "titleTemplate",
                "templateParams",
                "base",
                "htmlAttrs",
                "bodyAttrs",
                "meta",
                "link",
                "style",
                "script",
                "noscript",
            ],
            ["title", "titleTemplate", "script", "style", "noscript"],
            ["meta", "link", "style", "script", "noscript"],
        )
    }

    /// Process-wide default tables, built on first use
    pub fn shared() -> &'static Self {
        &UNHEAD
    }

    pub fn is_valid(&self, tag: &str) -> bool {
        self.valid.contains(tag)
    }

    pub fn has_inner_content(&self, tag: &str) -> bool {
        self.inner_content.contains(tag)
    }

    /// True for collection tags that may appear several times per document
    pub fn has_element_semantics(&self, tag: &str) -> bool {
        self.element.contains(tag)
    }

    pub fn is_singleton(&self, tag: &str) -> bool {
        self.is_valid(tag) && !self.has_element_semantics(tag)
    }
}

fn to_set<'a>(tags: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    tags.into_iter().map(str::to_owned).collect()
}

/// Field that receives a tag's collapsed children
pub fn content_key(tag: &str) -> &'static str {
    if tag == "script" {
        INNER_HTML
    } else {
        TEXT_CONTENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unhead_classification() {
        let tags = TagSets::shared();
        assert!(tags.is_valid("title"));
        assert!(tags.is_valid("meta"));
        assert!(!tags.is_valid("div"));

        assert!(tags.is_singleton("title"));
        assert!(tags.is_singleton("base"));
        assert!(!tags.is_singleton("meta"));
        assert!(!tags.is_singleton("div"));

        assert!(tags.has_element_semantics("link"));
        assert!(tags.has_element_semantics("script"));
        assert!(!tags.has_element_semantics("htmlAttrs"));

        assert!(tags.has_inner_content("style"));
        assert!(!tags.has_inner_content("meta"));
    }

    #[test]
    fn test_subsets_of_valid() {
        let tags = TagSets::unhead();
        assert!(tags.inner_content.is_subset(&tags.valid));
        assert!(tags.element.is_subset(&tags.valid));
    }

    #[test]
    fn test_content_key() {
        assert_eq!(content_key("script"), "innerHTML");
        assert_eq!(content_key("title"), "textContent");
        assert_eq!(content_key("style"), "textContent");
    }

    #[test]
    fn test_custom_tables() {
        let tags = TagSets::new(["title", "meta"], ["title"], ["meta"]);
        assert!(tags.is_valid("meta"));
        assert!(!tags.is_valid("link"));
        assert_eq!(TagSets::default(), TagSets::unhead());
    }
}
