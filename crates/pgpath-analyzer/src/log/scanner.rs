//! RELOPTINFO block scanner
//!
//! Walks the planner log once, line by line, and captures the lines that
//! belong to the base relation sections of the requested aliases. The scan is
//! an explicit state machine:
//!
//! | State | Entered on | Lines |
//! |---|---|---|
//! | `Idle` | start, header of a relation nobody asked for | dropped |
//! | `InBaseBlock` | header naming one requested relation | captured |
//! | `InJoinOrSuppressed` | header naming several relations, cheapest-path marker | dropped |
//!
//! Every header line re-evaluates the state from scratch. A header restating
//! the relation of the current block keeps it open.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::alias::canonical;

static HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RELOPTINFO \(([^)]*)\):").expect("valid regex"));

/// Markers of the cheapest-path summaries printed after the path lists.
///
/// The summaries repeat paths already listed, so capture stops at the first
/// of them until the next header.
pub const CHEAPEST_PATH_MARKERS: [&str; 3] = [
    "cheapest parameterized paths",
    "cheapest startup path",
    "cheapest total path",
];

/// A parsed `RELOPTINFO (<identifiers>):` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelOptHeader<'a> {
    pub identifiers: Vec<&'a str>,
}

impl<'a> RelOptHeader<'a> {
    /// Parses a header line, ignoring leading whitespace
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = HEADER_REGEX.captures(line.trim_start())?;
        let identifiers = caps.get(1)?.as_str().split_whitespace().collect();
        Some(Self { identifiers })
    }

    /// Returns the identifier of a base relation header
    pub fn single(&self) -> Option<&'a str> {
        match self.identifiers.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    /// Returns true if the header belongs to a join node
    pub fn is_join(&self) -> bool {
        self.identifiers.len() > 1
    }
}

/// Lines captured for one canonical alias
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogBlock {
    /// Canonical alias the lines belong to
    pub alias: String,
    /// Raw log lines, header lines included
    pub lines: Vec<String>,
}

impl LogBlock {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            lines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Scanner state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Outside any section of interest
    Idle,
    /// Inside the section of a requested base relation
    InBaseBlock { alias: String },
    /// Inside a join section or past a cheapest-path marker
    InJoinOrSuppressed,
}

/// Stateful line scanner producing one [`LogBlock`] per requested alias
#[derive(Debug)]
pub struct LogScanner<'a> {
    requested: &'a BTreeSet<String>,
    state: ScanState,
    blocks: BTreeMap<String, LogBlock>,
}

impl<'a> LogScanner<'a> {
    /// Creates a scanner for a set of canonical aliases
    pub fn new(requested: &'a BTreeSet<String>) -> Self {
        let blocks = requested
            .iter()
            .map(|alias| (alias.clone(), LogBlock::new(alias.clone())))
            .collect();

        Self {
            requested,
            state: ScanState::Idle,
            blocks,
        }
    }

    /// Current state
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Feeds one log line (without its line terminator)
    pub fn feed(&mut self, line: &str) {
        if let Some(header) = RelOptHeader::parse(line) {
            self.state = self.enter(&header);
            if let ScanState::InBaseBlock { alias } = &self.state
                && let Some(block) = self.blocks.get_mut(alias)
            {
                block.lines.push(line.to_string());
            }
            return;
        }

        if let ScanState::InBaseBlock { alias } = &self.state {
            if CHEAPEST_PATH_MARKERS.iter().any(|m| line.contains(m)) {
                tracing::trace!(alias = %alias, "cheapest-path summary, suppressing until next header");
                self.state = ScanState::InJoinOrSuppressed;
            } else if let Some(block) = self.blocks.get_mut(alias) {
                block.lines.push(line.to_string());
            }
        }
    }

    /// Ends the scan and returns the captured blocks, keyed by canonical alias
    pub fn finish(self) -> BTreeMap<String, LogBlock> {
        self.blocks
    }

    fn enter(&self, header: &RelOptHeader<'_>) -> ScanState {
        if header.is_join() {
            tracing::trace!(relids = ?header.identifiers, "join section");
            return ScanState::InJoinOrSuppressed;
        }

        let Some(ident) = header.single() else {
            return ScanState::Idle;
        };
        let alias = canonical(ident);
        if !self.requested.contains(alias) {
            return ScanState::Idle;
        }

        match &self.state {
            ScanState::InBaseBlock { alias: current } if current == alias => {
                tracing::trace!(alias, ident, "header restates current relation");
            }
            _ => tracing::debug!(alias, ident, "entering base relation section"),
        }
        ScanState::InBaseBlock {
            alias: alias.to_string(),
        }
    }
}

/// Scans a whole planner log for the given canonical aliases.
///
/// Every requested alias gets a block, possibly empty.
pub fn scan_log(text: &str, requested: &BTreeSet<String>) -> BTreeMap<String, LogBlock> {
    let mut scanner = LogScanner::new(requested);
    for line in text.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}
