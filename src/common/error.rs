//! Error types for the tree and its command driver.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in the crate.
///
/// Structural operations (insert, delete, search) never fail: a missing key
/// on delete is a no-op and an empty search is an empty result. Errors come
/// from configuration, from the command driver, and from the explicit
/// invariant checker.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested order cannot produce a well-formed tree.
    #[error("invalid order {order}: must be at least {min}")]
    InvalidOrder { order: usize, min: usize },

    /// A command other than `Initialize` arrived before the tree existed.
    #[error("line {line}: tree used before Initialize")]
    NotInitialized { line: usize },

    /// A driver input line could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A structural invariant does not hold.
    ///
    /// This indicates a bug in the tree engine, never bad input.
    #[error("tree corrupted: {0}")]
    Corrupted(String),

    /// I/O error from reading commands or writing results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}
