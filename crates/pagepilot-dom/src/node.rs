//! Node variants stored in the tree arena.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{CoordinateSet, ViewportInfo};

/// Handle to a node inside one [`DomTree`](crate::DomTree).
///
/// Only meaningful for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A parsed snapshot node.
#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Element(ElementNode),
    Text(TextNode),
}

impl DomNode {
    /// Parent handle, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            DomNode::Element(el) => el.parent,
            DomNode::Text(text) => text.parent,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            DomNode::Element(el) => el.is_visible,
            DomNode::Text(text) => text.is_visible,
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            DomNode::Element(el) => Some(el),
            DomNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            DomNode::Element(_) => None,
            DomNode::Text(text) => Some(text),
        }
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementNode {
    /// Tag name as reported by the page (usually lowercase).
    pub tag_name: String,

    /// Absolute XPath of the element.
    pub xpath: String,

    pub attributes: HashMap<String, String>,

    /// Children in document order.
    pub children: Vec<NodeId>,

    pub is_visible: bool,
    pub is_interactive: bool,
    pub is_top_element: bool,

    /// Handle exposed to the decision-maker, if the element is actionable.
    pub highlight_index: Option<u32>,

    pub viewport_coordinates: Option<CoordinateSet>,
    pub page_coordinates: Option<CoordinateSet>,
    pub viewport_info: Option<ViewportInfo>,

    /// Parent handle, `None` for the root.
    pub parent: Option<NodeId>,
}

impl ElementNode {
    /// Get an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the decision-maker can address this element.
    pub fn is_highlighted(&self) -> bool {
        self.highlight_index.is_some()
    }
}

/// A text leaf.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextNode {
    pub text: String,
    pub is_visible: bool,
    pub parent: Option<NodeId>,
}
