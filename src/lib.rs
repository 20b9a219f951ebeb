//! bplustree - An in-memory B+ tree index with a linked leaf chain.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           bplustree                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Command Driver (driver/)                    │   │
//! │  │        Parse line → Execute → Write search result        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/btree/)                  │   │
//! │  │   Search/Range  │  Insert + Split  │  Delete + Rebalance │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │   Node arena: Leaf | Internal, linked leaves    │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │          SharedTree (RwLock) + TreeStats                 │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Common (common/)                               │   │
//! │  │        Key/Value, NodeId, Error, TreeConfig              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Entry, Error, config)
//! - [`index`] - The B+ tree engine
//! - [`driver`] - Line-oriented command driver
//!
//! # Quick Start
//! ```
//! use bplustree::BPlusTree;
//!
//! let mut tree = BPlusTree::new(3).unwrap();
//! tree.insert(21, 0.3534);
//! tree.insert(108, 31.907);
//! tree.insert(56089, 3.26);
//!
//! assert_eq!(tree.search(108), vec![31.907]);
//! assert_eq!(tree.search_range(1, 200), vec![0.3534, 31.907]);
//!
//! tree.delete(108);
//! assert!(tree.search(108).is_empty());
//! ```

pub mod common;
pub mod driver;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_ORDER, MIN_ORDER};
pub use common::{Entry, Error, Key, NodeId, Result, TreeConfig, Value};

pub use index::btree::{BPlusTree, Range, SharedTree, StatsSnapshot, TreeStats};
