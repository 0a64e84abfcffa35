use std::collections::BTreeMap;

use crate::error::Result;
use crate::tree::parser::parse_markup;

/// One element of a parsed page source.
///
/// Attributes are kept sorted by key so every traversal and serialization of
/// the same tree is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiNode {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<UiNode>,
}

impl UiNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder: append a child.
    pub fn with_child(mut self, child: UiNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Attribute value, treating an empty string as absent.
    pub fn non_empty_attr(&self, key: &str) -> Option<&str> {
        self.attr(key).filter(|v| !v.is_empty())
    }

    /// Pre-order walk starting with `self` (document order).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a UiNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a UiNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A parsed page source plus where it came from.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub source: String,
    pub root: UiNode,
}

impl Snapshot {
    pub fn new(source: impl Into<String>, root: UiNode) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }

    pub fn parse(source: impl Into<String>, markup: &str) -> Result<Self> {
        let root = parse_markup(markup)?;
        Ok(Self::new(source, root))
    }

    pub fn node_count(&self) -> usize {
        self.root.descendants().count()
    }
}
