//! Command execution.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::common::{Error, Result};
use crate::index::btree::{BPlusTree, StatsSnapshot};

use super::command::Command;
use super::format::format_values;

/// What a completed run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Commands executed (blank lines excluded).
    pub commands: usize,
    /// Result lines written.
    pub searches: usize,
    /// Statistics of the final tree, if one was initialized.
    pub stats: Option<StatsSnapshot>,
}

/// Applies commands to a tree and writes search results.
///
/// `Initialize` must come before any other command. A later `Initialize`
/// discards the current tree and starts a fresh one.
///
/// # Example
/// ```
/// use bplustree::driver::Driver;
///
/// let input = "Initialize(3)\nInsert(1,1.5)\nSearch(1)\nSearch(2)\n";
/// let mut output = Vec::new();
/// Driver::new().run(input.as_bytes(), &mut output).unwrap();
///
/// assert_eq!(String::from_utf8(output).unwrap(), "1.5\nNull\n");
/// ```
#[derive(Debug, Default)]
pub struct Driver {
    tree: Option<BPlusTree>,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current tree, if `Initialize` has run.
    pub fn tree(&self) -> Option<&BPlusTree> {
        self.tree.as_ref()
    }

    /// Execute one command, writing a result line if it is a search.
    ///
    /// Returns whether a line was written.
    ///
    /// # Errors
    /// - `Error::NotInitialized` if no tree exists yet
    /// - `Error::InvalidOrder` from `Initialize`
    /// - I/O errors from `out`
    pub fn execute<W: Write>(&mut self, command: Command, line_no: usize, out: &mut W) -> Result<bool> {
        match command {
            Command::Initialize(order) => {
                if self.tree.is_some() {
                    info!(line = line_no, "replacing existing tree");
                }
                self.tree = Some(BPlusTree::new(order)?);
                info!(order, "tree initialized");
                Ok(false)
            }
            Command::Insert(key, value) => {
                self.tree_mut(line_no)?.insert(key, value);
                Ok(false)
            }
            Command::Delete(key) => {
                self.tree_mut(line_no)?.delete(key);
                Ok(false)
            }
            Command::Search(key) => {
                let values = self.tree_mut(line_no)?.search(key);
                writeln!(out, "{}", format_values(&values))?;
                Ok(true)
            }
            Command::SearchRange(start, end) => {
                let values = self.tree_mut(line_no)?.search_range(start, end);
                writeln!(out, "{}", format_values(&values))?;
                Ok(true)
            }
        }
    }

    fn tree_mut(&mut self, line_no: usize) -> Result<&mut BPlusTree> {
        self.tree
            .as_mut()
            .ok_or(Error::NotInitialized { line: line_no })
    }

    /// Execute every line of `input`, stopping at the first error.
    ///
    /// # Errors
    /// Parse, initialization, and I/O errors, each tagged with its line.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for (index, line) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            let Some(command) = Command::parse(&line, line_no)? else {
                continue;
            };

            debug!(line = line_no, %command, "execute");
            if self.execute(command, line_no, &mut output)? {
                summary.searches += 1;
            }
            summary.commands += 1;
        }
        output.flush()?;

        summary.stats = self.tree.as_ref().map(|tree| tree.stats().snapshot());
        if let Some(tree) = &self.tree {
            tree.stats().emit_tracing();
        }
        info!(
            commands = summary.commands,
            searches = summary.searches,
            "run complete"
        );
        Ok(summary)
    }
}

/// Run a command stream against a fresh driver.
pub fn run<R: BufRead, W: Write>(input: R, output: W) -> Result<RunSummary> {
    Driver::new().run(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_str(input: &str) -> Result<(String, RunSummary)> {
        let mut output = Vec::new();
        let summary = run(input.as_bytes(), &mut output)?;
        Ok((String::from_utf8(output).unwrap(), summary))
    }

    #[test]
    fn test_search_output_lines() {
        let input = "\
Initialize(3)
Insert(21,0.3534)
Insert(108,31.907)
Insert(56089,3.26)
Insert(234,121.56)
Insert(4325,-109.23)
Delete(108)
Search(234)
Insert(102,39.56)
Insert(65,-3.95)
Delete(102)
Delete(21)
Insert(106,-3.91)
Insert(23,3.55)
Search(23,99)
Insert(32,0.02)
Insert(220,3.55)
Search(33)
Delete(234)
Search(65)
";
        let (output, summary) = run_str(input).unwrap();
        assert_eq!(output, "121.56\n3.55,-3.95\nNull\n-3.95\n");
        assert_eq!(summary.commands, 20);
        assert_eq!(summary.searches, 4);
        assert!(summary.stats.is_some());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let (output, summary) = run_str("\nInitialize(4)\n\nInsert(1,1)\n\nSearch(1)\n").unwrap();
        assert_eq!(output, "1.0\n");
        assert_eq!(summary.commands, 3);
    }

    #[test]
    fn test_command_before_initialize_fails() {
        let err = run_str("Insert(1,1.0)\n").unwrap_err();
        assert!(matches!(err, Error::NotInitialized { line: 1 }));
    }

    #[test]
    fn test_invalid_order_fails_fast() {
        let err = run_str("Initialize(2)\nInsert(1,1.0)\n").unwrap_err();
        assert!(matches!(err, Error::InvalidOrder { order: 2, .. }));
    }

    #[test]
    fn test_reinitialize_discards_tree() {
        let (output, _) = run_str("Initialize(3)\nInsert(1,1.0)\nInitialize(5)\nSearch(1)\n").unwrap();
        assert_eq!(output, "Null\n");
    }

    #[test]
    fn test_execute_reports_written_lines() {
        let mut driver = Driver::new();
        let mut out = Vec::new();
        assert!(!driver.execute(Command::Initialize(4), 1, &mut out).unwrap());
        assert!(!driver.execute(Command::Insert(3, 0.5), 2, &mut out).unwrap());
        assert!(driver.execute(Command::Search(3), 3, &mut out).unwrap());
        assert_eq!(out, b"0.5\n");
        assert_eq!(driver.tree().map(BPlusTree::len), Some(1));
    }
}
