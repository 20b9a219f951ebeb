//! Command parsing.

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, Key, Result, Value};

/// One driver command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `Initialize(order)` - create (or replace) the tree.
    Initialize(usize),
    /// `Insert(key, value)`
    Insert(Key, Value),
    /// `Search(key)`
    Search(Key),
    /// `Search(startKey, endKey)`
    SearchRange(Key, Key),
    /// `Delete(key)`
    Delete(Key),
}

impl Command {
    /// Parse one input line. `line_no` is 1-based and only used in errors.
    ///
    /// Blank lines parse to `None`. Whitespace around the command name and
    /// around each argument is ignored.
    ///
    /// # Errors
    /// Returns `Error::Parse` for unknown commands, wrong argument counts,
    /// or arguments that are not numbers.
    ///
    /// # Example
    /// ```
    /// use bplustree::driver::Command;
    ///
    /// assert_eq!(
    ///     Command::parse("Insert(21, 0.3534)", 1).unwrap(),
    ///     Some(Command::Insert(21, 0.3534))
    /// );
    /// assert_eq!(Command::parse("   ", 2).unwrap(), None);
    /// assert!(Command::parse("Upsert(1,2)", 3).is_err());
    /// ```
    pub fn parse(line: &str, line_no: usize) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, args) = match (line.find('('), line.strip_suffix(')')) {
            (Some(open), Some(body)) => (line[..open].trim(), &body[open + 1..]),
            _ => {
                return Err(Error::parse(
                    line_no,
                    format!("expected `Command(args)`, got `{}`", line),
                ))
            }
        };
        let args: Vec<&str> = if args.trim().is_empty() {
            Vec::new()
        } else {
            args.split(',').map(str::trim).collect()
        };

        let command = match (name, args.as_slice()) {
            ("Initialize", [order]) => Command::Initialize(number(order, "order", line_no)?),
            ("Insert", [key, value]) => Command::Insert(
                number(key, "key", line_no)?,
                number(value, "value", line_no)?,
            ),
            ("Search", [key]) => Command::Search(number(key, "key", line_no)?),
            ("Search", [start, end]) => Command::SearchRange(
                number(start, "start key", line_no)?,
                number(end, "end key", line_no)?,
            ),
            ("Delete", [key]) => Command::Delete(number(key, "key", line_no)?),
            ("Initialize" | "Insert" | "Search" | "Delete", _) => {
                return Err(Error::parse(
                    line_no,
                    format!("`{}` does not take {} argument(s)", name, args.len()),
                ))
            }
            _ => return Err(Error::parse(line_no, format!("unknown command `{}`", name))),
        };
        Ok(Some(command))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Initialize(_) => "Initialize",
            Command::Insert(..) => "Insert",
            Command::Search(_) | Command::SearchRange(..) => "Search",
            Command::Delete(_) => "Delete",
        }
    }
}

fn number<T: FromStr>(text: &str, what: &str, line_no: usize) -> Result<T> {
    text.parse()
        .map_err(|_| Error::parse(line_no, format!("invalid {} `{}`", what, text)))
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Initialize(order) => write!(f, "Initialize({})", order),
            Command::Insert(key, value) => write!(f, "Insert({},{:?})", key, value),
            Command::Search(key) => write!(f, "Search({})", key),
            Command::SearchRange(start, end) => write!(f, "Search({},{})", start, end),
            Command::Delete(key) => write!(f, "Delete({})", key),
        }
    }
}
