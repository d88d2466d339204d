//! Path line parser
//!
//! Turns the captured lines of a [`LogBlock`] into path records. Four line
//! shapes matter inside a block:
//!
//! - `RELOPTINFO (<ident>): ...` starts a segment (one per partition for a
//!   collapsed alias)
//! - `path list:` / `partial path list:` select the list being read
//! - `SeqScan(<table>) ... rows=<int> ... cost=<startup>..<total>` is a path,
//!   parameterized when it carries `required_outer (<rels>)`
//! - `index name: <name>` names the index of the path right above it
//!
//! Everything else is planner commentary and is skipped.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alias::{canonical, is_partition_alias};
use crate::log::scanner::{LogBlock, RelOptHeader};
use crate::paths::{AliasReport, PathList, PathRecord, ScanType, assemble};

static PATH_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(IdxScan|SeqScan)\(([^)]*)\)").expect("valid regex"));

static ROWS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\brows=(\S*)").expect("valid regex"));

static COST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bcost=\s*(\S*?)\s*\.\.\s*(\S*)").expect("valid regex"));

static REQUIRED_OUTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"required_outer\s*\(([^)]*)\)").expect("valid regex"));

static INDEX_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^index name:\s*(\S+)").expect("valid regex"));

/// Errors for lines that look like paths but cannot be read
#[derive(Debug, Error, PartialEq)]
pub enum PathLineError {
    #[error("missing rows= field")]
    MissingRows,

    #[error("missing cost= field")]
    MissingCost,

    #[error("invalid row count: {0:?}")]
    InvalidRows(String),

    #[error("invalid cost: {0:?}")]
    InvalidCost(String),

    #[error("total cost {total} is below startup cost {startup}")]
    CostOrder { startup: f64, total: f64 },
}

/// A path line and the table it scans
#[derive(Debug, Clone, PartialEq)]
pub struct PathLine {
    /// `<table>` token between the parentheses
    pub table: String,
    pub record: PathRecord,
}

/// Parses a trimmed path line.
///
/// Returns `None` when the line is not a path line at all, and an error when
/// it is one but its numeric fields cannot be read.
pub fn parse_path_line(line: &str) -> Option<Result<PathLine, PathLineError>> {
    let caps = PATH_LINE_REGEX.captures(line)?;
    let scan_type = ScanType::parse(&caps[1])?;
    let table = caps[2].trim().to_string();
    Some(parse_estimates(line, scan_type).map(|record| PathLine { table, record }))
}

fn parse_estimates(line: &str, scan_type: ScanType) -> Result<PathRecord, PathLineError> {
    let rows_caps = ROWS_REGEX.captures(line).ok_or(PathLineError::MissingRows)?;
    let rows = rows_caps[1]
        .parse::<u64>()
        .map_err(|_| PathLineError::InvalidRows(rows_caps[1].to_string()))?;

    let cost_caps = COST_REGEX.captures(line).ok_or(PathLineError::MissingCost)?;
    let startup = parse_cost(&cost_caps[1])?;
    let total = parse_cost(&cost_caps[2])?;
    if total < startup {
        return Err(PathLineError::CostOrder { startup, total });
    }

    let mut record = PathRecord::new(scan_type, rows, startup, total);
    if let Some(outer) = REQUIRED_OUTER_REGEX.captures(line) {
        record.required_outer = Some(outer[1].trim().to_string());
    }
    Ok(record)
}

fn parse_cost(s: &str) -> Result<f64, PathLineError> {
    match s.parse::<f64>() {
        Ok(cost) if cost.is_finite() && cost >= 0.0 => Ok(cost),
        _ => Err(PathLineError::InvalidCost(s.to_string())),
    }
}

/// Raw path records of one alias, before assembly
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CollectedPaths {
    pub path_list: Vec<PathRecord>,
    pub partial_path_list: Vec<PathRecord>,
    pub parameterized_path_list: Vec<PathRecord>,
}

impl CollectedPaths {
    fn list_mut(&mut self, list: PathList) -> &mut Vec<PathRecord> {
        match list {
            PathList::Path => &mut self.path_list,
            PathList::Partial => &mut self.partial_path_list,
            PathList::Parameterized => &mut self.parameterized_path_list,
        }
    }

    /// Deduplicates and partition-separates each list
    pub fn into_report(self) -> AliasReport {
        AliasReport {
            path_list: assemble(self.path_list),
            partial_path_list: assemble(self.partial_path_list),
            parameterized_path_list: assemble(self.parameterized_path_list),
        }
    }
}

/// Line-by-line path extractor for one canonical alias
#[derive(Debug)]
pub struct PathLineParser<'a> {
    alias: &'a str,
    section: Option<PathList>,
    /// The current segment was opened by a partition alias
    partition_segment: bool,
    /// Where the last accepted record went, for `index name:` lines
    last: Option<(PathList, usize)>,
    paths: CollectedPaths,
}

impl<'a> PathLineParser<'a> {
    pub fn new(alias: &'a str) -> Self {
        Self {
            alias,
            section: None,
            partition_segment: false,
            last: None,
            paths: CollectedPaths::default(),
        }
    }

    /// Feeds one captured line
    pub fn feed(&mut self, raw: &str) {
        if let Some(header) = RelOptHeader::parse(raw) {
            self.partition_segment = header.single().is_some_and(is_partition_alias);
            self.section = None;
            self.last = None;
            return;
        }

        let line = raw.trim();
        if line.starts_with("path list:") {
            self.enter_section(PathList::Path);
        } else if line.starts_with("partial path list:") {
            self.enter_section(PathList::Partial);
        } else if let Some(parsed) = parse_path_line(line) {
            self.last = match parsed {
                Ok(path) => self.accept(path),
                Err(e) => {
                    tracing::warn!(alias = self.alias, line, error = %e, "discarding malformed path line");
                    None
                }
            };
        } else if let Some(caps) = INDEX_NAME_REGEX.captures(line) {
            self.attach_index(&caps[1]);
        }
    }

    /// Returns the collected records
    pub fn finish(self) -> CollectedPaths {
        self.paths
    }

    fn enter_section(&mut self, list: PathList) {
        self.section = Some(list);
        self.last = None;
    }

    fn accept(&mut self, path: PathLine) -> Option<(PathList, usize)> {
        let Some(section) = self.section else {
            tracing::debug!(alias = self.alias, table = %path.table, "path line outside a path list");
            return None;
        };

        if self.partition_segment && !canonical(&path.table).eq_ignore_ascii_case(self.alias) {
            tracing::debug!(alias = self.alias, table = %path.table, "path of a foreign table in partition segment");
            return None;
        }

        let list = if path.record.is_parameterized() {
            PathList::Parameterized
        } else {
            section
        };
        let records = self.paths.list_mut(list);
        records.push(path.record);
        Some((list, records.len() - 1))
    }

    fn attach_index(&mut self, index_name: &str) {
        let Some((list, pos)) = self.last else {
            return;
        };
        if let Some(record) = self.paths.list_mut(list).get_mut(pos)
            && record.index_name.is_none()
        {
            record.index_name = Some(index_name.to_string());
        }
    }
}

/// Extracts the raw path records of a captured block
pub fn collect_paths(block: &LogBlock) -> CollectedPaths {
    let mut parser = PathLineParser::new(&block.alias);
    for line in &block.lines {
        parser.feed(line);
    }
    parser.finish()
}
