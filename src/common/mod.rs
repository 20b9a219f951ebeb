//! Common types and utilities shared across the crate.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and [`TreeConfig`](config::TreeConfig)
//! - Error types
//! - Identifiers and record types (NodeId, Entry)

pub mod config;
pub mod error;
mod node_id;

pub use config::TreeConfig;
pub use error::{Error, Result};
pub use node_id::NodeId;

/// Key type stored in the tree.
pub type Key = i32;

/// Value type stored alongside each key in a leaf.
pub type Value = f64;

/// A single key/value record held by a leaf node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub key: Key,
    pub value: Value,
}

impl Entry {
    /// Create a new entry.
    #[inline]
    pub fn new(key: Key, value: Value) -> Self {
        Entry { key, value }
    }
}
