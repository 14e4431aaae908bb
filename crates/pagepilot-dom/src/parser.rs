//! SnapshotParser: raw page-state payload to typed arena.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::node::{DomNode, ElementNode, NodeId, TextNode};
use crate::tree::DomTree;
use crate::types::{CoordinateSet, Point, ViewportInfo};

type Object = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Element,
    Text,
}

impl NodeKind {
    fn detect(obj: &Object) -> Option<Self> {
        match obj.get("type") {
            Some(Value::String(kind)) => match kind.as_str() {
                "ELEMENT_NODE" => Some(Self::Element),
                "TEXT_NODE" => Some(Self::Text),
                other => {
                    warn!("Unknown snapshot node type '{}', skipping node", other);
                    None
                }
            },
            None | Some(Value::Null) => Self::infer(obj),
            Some(other) => {
                warn!("Non-string snapshot node type {}, skipping node", other);
                None
            }
        }
    }

    /// Compatibility shim for snapshots captured without the `type`
    /// discriminator: a tag name means element, a text field means text.
    /// A node with neither is not guessed at.
    fn infer(obj: &Object) -> Option<Self> {
        if obj.contains_key("tagName") {
            Some(Self::Element)
        } else if obj.contains_key("text") {
            Some(Self::Text)
        } else {
            debug!("Snapshot node has neither tagName nor text, skipping node");
            None
        }
    }
}

/// Builds a [`DomTree`] from the JSON payload returned by the page script.
///
/// Pure and synchronous: the payload is expected to be already retrieved.
pub struct SnapshotParser {
    nodes: Vec<DomNode>,
}

impl SnapshotParser {
    /// Parse a payload. A null, non-object or unrecognizable root yields
    /// `None`; no partial tree is produced.
    pub fn parse(raw: &Value) -> Option<DomTree> {
        let mut parser = Self { nodes: Vec::new() };
        let root = parser.parse_node(raw, None)?;
        debug!("Parsed snapshot with {} nodes", parser.nodes.len());
        Some(DomTree::from_parts(parser.nodes, root))
    }

    fn parse_node(&mut self, raw: &Value, parent: Option<NodeId>) -> Option<NodeId> {
        let obj = raw.as_object()?;
        match NodeKind::detect(obj)? {
            NodeKind::Element => self.parse_element(obj, parent),
            NodeKind::Text => self.parse_text(obj, parent),
        }
    }

    fn parse_text(&mut self, obj: &Object, parent: Option<NodeId>) -> Option<NodeId> {
        let Some(text) = obj.get("text").and_then(Value::as_str) else {
            warn!("Text node without string 'text' field, skipping node");
            return None;
        };

        Some(self.push(DomNode::Text(TextNode {
            text: text.to_string(),
            is_visible: flag(obj, "isVisible"),
            parent,
        })))
    }

    fn parse_element(&mut self, obj: &Object, parent: Option<NodeId>) -> Option<NodeId> {
        let Some(tag_name) = obj.get("tagName").and_then(Value::as_str) else {
            warn!("Element node without string 'tagName' field, skipping node");
            return None;
        };

        let element = ElementNode {
            tag_name: tag_name.to_string(),
            xpath: obj
                .get("xpath")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            attributes: attributes(obj),
            children: Vec::new(),
            is_visible: flag(obj, "isVisible"),
            is_interactive: flag(obj, "isInteractive"),
            is_top_element: flag(obj, "isTopElement"),
            highlight_index: highlight_index(obj),
            viewport_coordinates: obj.get("viewportCoordinates").and_then(coordinate_set),
            page_coordinates: obj.get("pageCoordinates").and_then(coordinate_set),
            viewport_info: obj.get("viewport").and_then(viewport_info),
            parent,
        };

        // Reserve the slot first so children can point back at it.
        let id = self.push(DomNode::Element(element));

        let children: Vec<NodeId> = obj
            .get("children")
            .and_then(Value::as_array)
            .map(|raw_children| {
                raw_children
                    .iter()
                    .filter_map(|child| self.parse_node(child, Some(id)))
                    .collect()
            })
            .unwrap_or_default();

        if let DomNode::Element(element) = &mut self.nodes[id.0] {
            element.children = children;
        }

        Some(id)
    }

    fn push(&mut self, node: DomNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

fn flag(obj: &Object, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn attributes(obj: &Object) -> HashMap<String, String> {
    let Some(raw) = obj.get("attributes").and_then(Value::as_object) else {
        return HashMap::new();
    };

    raw.iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Null => return None,
                other => other.to_string(),
            };
            Some((key.clone(), value))
        })
        .collect()
}

fn highlight_index(obj: &Object) -> Option<u32> {
    let raw = obj.get("highlightIndex")?;
    if raw.is_null() {
        return None;
    }
    let index = raw.as_u64().and_then(|v| u32::try_from(v).ok());
    if index.is_none() {
        warn!("Ignoring invalid highlightIndex {}", raw);
    }
    index
}

fn integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64))
}

fn point(value: &Value) -> Option<Point> {
    let obj = value.as_object()?;
    Some(Point {
        x: integer(obj.get("x")?)?,
        y: integer(obj.get("y")?)?,
    })
}

/// All-or-nothing: any missing or mistyped field drops the whole set.
fn coordinate_set(value: &Value) -> Option<CoordinateSet> {
    let parsed = (|| {
        let obj = value.as_object()?;
        Some(CoordinateSet {
            top_left: point(obj.get("topLeft")?)?,
            top_right: point(obj.get("topRight")?)?,
            bottom_left: point(obj.get("bottomLeft")?)?,
            bottom_right: point(obj.get("bottomRight")?)?,
            center: point(obj.get("center")?)?,
            width: integer(obj.get("width")?)?,
            height: integer(obj.get("height")?)?,
        })
    })();

    if parsed.is_none() && !value.is_null() {
        warn!("Dropping malformed coordinate set");
    }
    parsed
}

fn viewport_info(value: &Value) -> Option<ViewportInfo> {
    let parsed = (|| {
        let obj = value.as_object()?;
        Some(ViewportInfo {
            scroll_x: integer(obj.get("scrollX")?)?,
            scroll_y: integer(obj.get("scrollY")?)?,
            width: integer(obj.get("width")?)?,
            height: integer(obj.get("height")?)?,
        })
    })();

    if parsed.is_none() && !value.is_null() {
        warn!("Dropping malformed viewport info");
    }
    parsed
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
