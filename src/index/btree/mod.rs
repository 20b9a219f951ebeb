//! B+ tree index implementation.
//!
//! # Components
//! - [`BPlusTree`] - The tree: routing, insertion, deletion, range scans
//! - [`Range`] - Lazy forward iterator over the leaf chain
//! - [`SharedTree`] - Lock-guarded handle for use across threads
//! - [`TreeStats`] - Structural operation counters
//!
//! # Layout
//! ```text
//!                      ┌──────────────┐
//!                      │  [ 3 | 5 ]   │  internal: separators + children
//!                      └──┬────┬───┬──┘
//!             ┌───────────┘    │   └──────────┐
//!       ┌─────▼─────┐    ┌─────▼─────┐  ┌─────▼─────┐
//!       │ 1:1.0 2:2.0│◀─▶│ 3:3.0 4:4.0│◀▶│ 5:5.0 6:6.0│  leaves: entries
//!       └───────────┘    └───────────┘  └───────────┘
//! ```
//!
//! All nodes live in a single node arena. Parent → child edges
//! are the owning relationship; parent back-references and the leaf chain's
//! `prev`/`next` links are plain [`NodeId`](crate::NodeId) copies.

mod arena;
mod delete;
mod insert;
mod node;
mod search;
mod shared;
mod stats;
mod tree;
mod validate;

pub use search::Range;
pub use shared::SharedTree;
pub use stats::{StatsSnapshot, TreeStats};
pub use tree::BPlusTree;
