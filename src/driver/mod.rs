//! Line-oriented command driver.
//!
//! Reads commands of the form `Command(arg1[,arg2])`, one per line, applies
//! them to a tree, and writes one output line per `Search`:
//!
//! ```text
//! Initialize(3)        ─┐
//! Insert(21,0.3534)     │
//! Insert(108,31.907)    ├──▶ Driver ──▶ 0.3534,31.907
//! Search(1,200)         │              Null
//! Search(5)            ─┘
//! ```
//!
//! # Components
//! - [`Command`] - A parsed input line
//! - [`Driver`] - Applies commands and writes search results
//! - [`format_values`] - Output line rendering

mod command;
mod format;
mod runner;

pub use command::Command;
pub use format::{format_value, format_values};
pub use runner::{run, Driver, RunSummary};
