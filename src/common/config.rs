//! Configuration constants for the tree.

use crate::common::{Error, Result};

/// Smallest order the tree accepts.
///
/// With order 3 a node holds at most 2 entries; a split at `order / 2 = 1`
/// still leaves both halves non-empty. Anything smaller produces empty split
/// halves, so it is rejected at construction instead.
pub const MIN_ORDER: usize = 3;

/// Order used when none is configured.
pub const DEFAULT_ORDER: usize = 4;

/// Validated tree configuration.
///
/// # Example
/// ```
/// use bplustree::TreeConfig;
///
/// let config = TreeConfig::new(5).unwrap();
/// assert_eq!(config.order(), 5);
/// assert_eq!(config.max_entries(), 4);
///
/// assert!(TreeConfig::new(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    order: usize,
}

impl TreeConfig {
    /// Create a configuration for the given order.
    ///
    /// # Errors
    /// Returns `Error::InvalidOrder` if `order < MIN_ORDER`.
    pub fn new(order: usize) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder {
                order,
                min: MIN_ORDER,
            });
        }
        Ok(Self { order })
    }

    /// The configured order.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Maximum number of entries (or separators) a node may hold at rest.
    #[inline]
    pub fn max_entries(&self) -> usize {
        self.order - 1
    }

    /// Index at which an overflowing node is split.
    #[inline]
    pub fn split_index(&self) -> usize {
        self.order / 2
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
        }
    }
}
