//! Descriptor builder: element list in, head descriptor out

use crate::descriptor::model::HeadDescriptor;
use crate::element::{Element, CHILDREN_PROP};
use crate::tags::{content_key, TagSets};
use crate::value::{Props, Value};
use std::sync::LazyLock;
use tracing::{instrument, trace};

static DEFAULT_BUILDER: LazyLock<DescriptorBuilder> = LazyLock::new(DescriptorBuilder::new);

/// Configuration for the descriptor builder
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Tag classification tables
    pub tag_sets: TagSets,
    /// Framework-internal property names never copied into a descriptor
    pub internal_keys: Vec<String>,
    /// Properties starting with this prefix are framework-internal too
    pub internal_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag_sets: TagSets::default(),
            internal_keys: vec!["key".to_owned(), "ref".to_owned()],
            internal_prefix: "__".to_owned(),
        }
    }
}

impl Config {
    pub fn new(tag_sets: TagSets) -> Self {
        Self {
            tag_sets,
            ..Self::default()
        }
    }

    pub fn is_internal_key(&self, key: &str) -> bool {
        (!self.internal_prefix.is_empty() && key.starts_with(&self.internal_prefix))
            || self.internal_keys.iter().any(|k| k == key)
    }
}

/// Turns a component's element children into a [`HeadDescriptor`].
///
/// Building is total: unknown tags are dropped, later singletons replace
/// earlier ones, and nothing in the input can make it fail.
#[derive(Clone, Debug, Default)]
pub struct DescriptorBuilder {
    config: Config,
}

impl DescriptorBuilder {
    /// Create a builder with the default unhead tables
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a descriptor from element children in document order
    #[instrument(level = "trace", skip_all, fields(elements = elements.len()))]
    pub fn build(&self, elements: &[Element], title_template: Option<&str>) -> HeadDescriptor {
        let tags = &self.config.tag_sets;
        let mut descriptor = HeadDescriptor::new(title_template.map(str::to_owned));

        for element in elements {
            let tag = element.tag();
            if !tags.is_valid(tag) {
                trace!(tag, "skipping unrecognized head tag");
                continue;
            }

            let mut props = self.working_props(element.props());
            let children = props.remove(CHILDREN_PROP);
            if tags.has_inner_content(tag) {
                if let Some(children) = children.filter(Value::is_truthy) {
                    props.insert(content_key(tag), collapse_children(&children));
                }
            }

            if tags.has_element_semantics(tag) {
                descriptor.append(tag, props);
            } else {
                descriptor.assign(tag, props);
            }
        }

        descriptor
    }

    fn working_props(&self, props: &Props) -> Props {
        props
            .iter()
            .filter(|(key, _)| {
                let internal = self.config.is_internal_key(key);
                if internal {
                    trace!(key = key.as_str(), "dropping framework-internal property");
                }
                !internal
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Collapse text children into one string: fragments are concatenated
/// without a separator, a scalar is stringified.
fn collapse_children(children: &Value) -> String {
    match children {
        Value::Array(fragments) => fragments.iter().map(Value::to_text).collect(),
        scalar => scalar.to_text(),
    }
}

/// Build with the default builder
pub fn build(elements: &[Element], title_template: Option<&str>) -> HeadDescriptor {
    DEFAULT_BUILDER.build(elements, title_template)
}
