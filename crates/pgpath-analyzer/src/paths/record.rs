//! Path Record Model - access paths extracted from a planner debug log

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical access method of a path
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScanType {
    SeqScan,
    IdxScan,
}

impl ScanType {
    /// Returns the spelling used by the planner log
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SeqScan => "SeqScan",
            Self::IdxScan => "IdxScan",
        }
    }

    /// Parses the planner log spelling
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SeqScan" => Some(Self::SeqScan),
            "IdxScan" => Some(Self::IdxScan),
            _ => None,
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate access path with its estimates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathRecord {
    /// Sequential or index scan
    pub scan_type: ScanType,
    /// Index used by an index scan, taken from the following `index name:` line
    pub index_name: Option<String>,
    /// Estimated number of rows
    pub rows: u64,
    /// Cost to return the first row
    pub startup_cost: f64,
    /// Cost to return all rows
    pub total_cost: f64,
    /// Outer relations the path is parameterized by
    pub required_outer: Option<String>,
}

impl PathRecord {
    /// Creates a non-parameterized path without an index name
    pub fn new(scan_type: ScanType, rows: u64, startup_cost: f64, total_cost: f64) -> Self {
        Self {
            scan_type,
            index_name: None,
            rows,
            startup_cost,
            total_cost,
            required_outer: None,
        }
    }

    /// Sets the index name
    pub fn with_index(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    /// Sets the required outer relations
    pub fn with_required_outer(mut self, required_outer: impl Into<String>) -> Self {
        self.required_outer = Some(required_outer.into());
        self
    }

    /// Returns true if the path depends on values from an outer relation
    pub fn is_parameterized(&self) -> bool {
        self.required_outer.is_some()
    }
}

/// A row of an assembled path list: either a path or a partition separator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PathRow {
    Path(PathRecord),
    Separator,
}

impl PathRow {
    /// Returns the path record, or `None` for a separator
    pub fn record(&self) -> Option<&PathRecord> {
        match self {
            Self::Path(record) => Some(record),
            Self::Separator => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }
}

/// The three path lists a planner keeps per relation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PathList {
    Path,
    Partial,
    Parameterized,
}

impl PathList {
    /// All lists, in report order
    pub const ALL: [PathList; 3] = [Self::Path, Self::Partial, Self::Parameterized];

    /// Section label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Path => "Path List:",
            Self::Partial => "Partial Path List:",
            Self::Parameterized => "Parameterized Path List:",
        }
    }
}

/// Assembled path lists of one canonical alias
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AliasReport {
    pub path_list: Vec<PathRow>,
    pub partial_path_list: Vec<PathRow>,
    pub parameterized_path_list: Vec<PathRow>,
}

impl AliasReport {
    /// Returns the rows of one list
    pub fn rows(&self, list: PathList) -> &[PathRow] {
        match list {
            PathList::Path => &self.path_list,
            PathList::Partial => &self.partial_path_list,
            PathList::Parameterized => &self.parameterized_path_list,
        }
    }

    /// Returns true if no list holds any path
    pub fn is_empty(&self) -> bool {
        PathList::ALL.iter().all(|list| self.rows(*list).is_empty())
    }

    /// Number of paths across all lists, separators excluded
    pub fn path_count(&self) -> usize {
        PathList::ALL
            .iter()
            .flat_map(|list| self.rows(*list))
            .filter(|row| !row.is_separator())
            .count()
    }
}
