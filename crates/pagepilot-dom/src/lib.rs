//! # PagePilot DOM
//!
//! Typed view of a page snapshot produced by the browser driver's injected
//! script.
//!
//! ## Pipeline
//!
//! ```text
//! raw JSON payload ──► SnapshotParser ──► DomTree (arena) ──► ElementIndex
//!                                             │                   │
//!                                             └── LLM rendering   └── ElementTarget
//! ```
//!
//! - [`DomTree`] owns every node in a flat arena; parent and child links are
//!   [`NodeId`]s into that arena, so upward traversal never holds ownership.
//! - [`ElementIndex`] maps highlight indices to elements. It borrows the tree
//!   it was built from and cannot outlive it.
//! - Malformed optional sub-structures (coordinates, viewport) are dropped,
//!   never partially populated.

mod error;
mod index;
mod node;
mod parser;
mod tree;
mod types;

pub use error::DomError;
pub use index::{ElementIndex, ElementTarget};
pub use node::{DomNode, ElementNode, NodeId, TextNode};
pub use parser::SnapshotParser;
pub use tree::{DepthFirst, DomTree, DEFAULT_INCLUDE_ATTRIBUTES};
pub use types::{CoordinateSet, Point, ViewportInfo};
