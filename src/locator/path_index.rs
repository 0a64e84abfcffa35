use std::collections::HashMap;
use std::ptr;

use crate::error::{HarvestError, Result};
use crate::tree::tree_model::UiNode;

/// Child-to-parent lookup for one tree, built in a single traversal.
///
/// `UiNode` has no back-references, so nodes are identified by address.
/// The index borrows the tree, which keeps those addresses stable for its
/// whole lifetime.
pub struct TreeIndex<'a> {
    root: &'a UiNode,
    parents: HashMap<*const UiNode, &'a UiNode>,
}

impl<'a> TreeIndex<'a> {
    pub fn build(root: &'a UiNode) -> Self {
        let mut parents = HashMap::new();
        let mut stack = vec![root];

        while let Some(parent) = stack.pop() {
            for child in &parent.children {
                parents.insert(child as *const UiNode, parent);
                stack.push(child);
            }
        }

        Self { root, parents }
    }

    pub fn root(&self) -> &'a UiNode {
        self.root
    }

    pub fn parent_of(&self, node: &UiNode) -> Option<&'a UiNode> {
        self.parents.get(&(node as *const UiNode)).copied()
    }

    /// `/Root/Tag[k]/...` where `k` is the 1-based rank of each node among
    /// its siblings with the same tag. The root has no index suffix.
    pub fn absolute_path(&self, node: &UiNode) -> Result<String> {
        let mut segments = Vec::new();
        let mut current = node;

        while !ptr::eq(current, self.root) {
            let parent = self.parent_of(current).ok_or_else(|| HarvestError::DetachedNode {
                tag: node.tag.clone(),
            })?;
            segments.push(format!("/{}[{}]", current.tag, sibling_rank(parent, current)));
            current = parent;
        }

        segments.push(format!("/{}", self.root.tag));
        segments.reverse();
        Ok(segments.concat())
    }
}

fn sibling_rank(parent: &UiNode, node: &UiNode) -> usize {
    parent
        .children
        .iter()
        .filter(|c| c.tag == node.tag)
        .position(|c| ptr::eq(c, node))
        .map(|i| i + 1)
        .unwrap_or(0)
}

/// One-off lookup. Prefer building a `TreeIndex` when resolving many nodes
/// of the same tree.
pub fn absolute_path(node: &UiNode, root: &UiNode) -> Result<String> {
    TreeIndex::build(root).absolute_path(node)
}
