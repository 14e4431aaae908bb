//! DomTree: arena storage, traversal and LLM output.

use serde_json::Value;

use crate::error::DomError;
use crate::index::ElementIndex;
use crate::node::{DomNode, ElementNode, NodeId};
use crate::parser::SnapshotParser;

/// Attributes rendered next to highlighted elements by default.
pub const DEFAULT_INCLUDE_ATTRIBUTES: &[&str] = &[
    "title",
    "type",
    "name",
    "role",
    "aria-label",
    "placeholder",
    "value",
    "alt",
];

/// One parsed snapshot.
///
/// Nodes live in a flat arena; every non-root node has exactly one parent,
/// matching the child edge that created it.
#[derive(Debug, Clone, PartialEq)]
pub struct DomTree {
    nodes: Vec<DomNode>,
    root: NodeId,
}

impl DomTree {
    /// Parse a raw snapshot payload. See [`SnapshotParser::parse`].
    pub fn parse(raw: &Value) -> Option<Self> {
        SnapshotParser::parse(raw)
    }

    pub(crate) fn from_parts(nodes: Vec<DomNode>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Root node. Always present.
    pub fn root_node(&self) -> &DomNode {
        &self.nodes[self.root.0]
    }

    pub fn node(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id.0)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementNode> {
        self.node(id).and_then(DomNode::as_element)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(DomNode::parent)
    }

    /// Children of an element, empty for text nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(DomNode::Element(el)) => &el.children,
            _ => &[],
        }
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order traversal in child order, starting at the root.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        self.depth_first_from(self.root)
    }

    /// Pre-order traversal of the subtree rooted at `start`.
    pub fn depth_first_from(&self, start: NodeId) -> DepthFirst<'_> {
        DepthFirst {
            tree: self,
            stack: vec![start],
        }
    }

    /// Build the highlight-index lookup for this tree.
    pub fn element_index(&self) -> Result<ElementIndex<'_>, DomError> {
        ElementIndex::build(self)
    }

    /// Text under `id`, not descending into other highlighted elements.
    pub fn all_text_till_next_clickable_element(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        self.collect_text(id, id, &mut parts);
        parts.join("\n").trim().to_string()
    }

    fn collect_text<'a>(&'a self, origin: NodeId, id: NodeId, parts: &mut Vec<&'a str>) {
        match self.node(id) {
            Some(DomNode::Text(text)) => parts.push(&text.text),
            Some(DomNode::Element(el)) => {
                if id != origin && el.is_highlighted() {
                    return;
                }
                for &child in &el.children {
                    self.collect_text(origin, child, parts);
                }
            }
            None => {}
        }
    }

    /// Render highlighted elements, one per line, in depth-first order:
    /// `[index]<tag attr="value">text</tag>`.
    pub fn clickable_elements_to_string(&self, include_attributes: &[&str]) -> String {
        let mut lines = Vec::new();

        for id in self.depth_first() {
            let Some(el) = self.element(id) else {
                continue;
            };
            let Some(index) = el.highlight_index else {
                continue;
            };

            let attrs: Vec<String> = include_attributes
                .iter()
                .filter_map(|&key| {
                    el.attribute(key)
                        .filter(|v| !v.is_empty())
                        .map(|v| format!("{}=\"{}\"", key, v))
                })
                .collect();

            let open = if attrs.is_empty() {
                format!("<{}>", el.tag_name)
            } else {
                format!("<{} {}>", el.tag_name, attrs.join(" "))
            };

            let text = self
                .all_text_till_next_clickable_element(id)
                .replace('\n', " ");

            lines.push(format!("[{}]{}{}</{}>", index, open, text, el.tag_name));
        }

        lines.join("\n")
    }
}

/// Pre-order iterator over node handles.
pub struct DepthFirst<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DepthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
