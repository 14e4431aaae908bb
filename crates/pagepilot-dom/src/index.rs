//! ElementIndex: highlight index to element lookup for one snapshot.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DomError;
use crate::node::{ElementNode, NodeId};
use crate::tree::DomTree;
use crate::types::Point;

/// Lookup from highlight index to element, borrowed from the tree that
/// produced it.
///
/// Highlight indices are not stable across snapshots, so the borrow ties an
/// index to exactly one tree.
#[derive(Debug, Clone)]
pub struct ElementIndex<'a> {
    tree: Option<&'a DomTree>,
    entries: BTreeMap<u32, NodeId>,
}

impl<'a> ElementIndex<'a> {
    /// Walk the tree depth-first and collect every highlighted element.
    ///
    /// Fails on a repeated highlight index instead of letting one element
    /// shadow the other.
    pub fn build(tree: &'a DomTree) -> Result<Self, DomError> {
        let mut entries = BTreeMap::new();

        for id in tree.depth_first() {
            let Some(el) = tree.element(id) else {
                continue;
            };
            let Some(index) = el.highlight_index else {
                continue;
            };

            if let Some(&first) = entries.get(&index) {
                let first_xpath = tree
                    .element(first)
                    .map(|e: &ElementNode| e.xpath.clone())
                    .unwrap_or_default();
                return Err(DomError::DuplicateHighlightIndex {
                    index,
                    first_xpath,
                    second_xpath: el.xpath.clone(),
                });
            }
            entries.insert(index, id);
        }

        Ok(Self {
            tree: Some(tree),
            entries,
        })
    }

    /// Index for a page without a snapshot tree.
    pub fn empty() -> Self {
        Self {
            tree: None,
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, highlight_index: u32) -> Option<&'a ElementNode> {
        let id = *self.entries.get(&highlight_index)?;
        self.tree?.element(id)
    }

    pub fn node_id(&self, highlight_index: u32) -> Option<NodeId> {
        self.entries.get(&highlight_index).copied()
    }

    pub fn contains(&self, highlight_index: u32) -> bool {
        self.entries.contains_key(&highlight_index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highlight indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// Elements in ascending highlight-index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &'a ElementNode)> + '_ {
        let tree = self.tree;
        self.entries
            .iter()
            .filter_map(move |(&index, &id)| tree?.element(id).map(|el| (index, el)))
    }

    /// Text of an element up to the next highlighted element.
    pub fn element_text(&self, highlight_index: u32) -> Option<String> {
        let id = self.node_id(highlight_index)?;
        Some(self.tree?.all_text_till_next_clickable_element(id))
    }

    /// Detached description of an element, safe to hand to the browser
    /// driver or keep in history after the tree is gone.
    pub fn target(&self, highlight_index: u32) -> Option<ElementTarget> {
        self.get(highlight_index)
            .map(|el| ElementTarget::from_element(highlight_index, el))
    }
}

/// Owned reference to an element by highlight index and xpath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementTarget {
    pub highlight_index: u32,
    pub xpath: String,
    pub tag_name: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Viewport-relative center, when geometry was captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Point>,
}

impl ElementTarget {
    pub fn from_element(highlight_index: u32, el: &ElementNode) -> Self {
        Self {
            highlight_index,
            xpath: el.xpath.clone(),
            tag_name: el.tag_name.clone(),
            attributes: el.attributes.clone(),
            center: el.viewport_coordinates.map(|c| c.center),
        }
    }

    /// Replace the xpath, e.g. with one supplied by the decision-maker.
    pub fn with_xpath(mut self, xpath: impl Into<String>) -> Self {
        self.xpath = xpath.into();
        self
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
