//! Index structures.
//!
//! Currently implements:
//! - [`btree`] - An in-memory B+ tree with a doubly linked leaf chain
//!
//! The leaf chain mirrors how block-oriented storage lays out index leaves
//! on disk, so range scans never revisit internal nodes.

pub mod btree;

pub use btree::{BPlusTree, Range, SharedTree, StatsSnapshot, TreeStats};
