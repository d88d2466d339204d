//! Sheet layout
//!
//! Each alias becomes one worksheet laid out as:
//!
//! ```text
//! Table: I
//! Path List:
//! Scan Type | Index Name | Rows | Startup Cost | Total Cost
//! SeqScan   |            |    5 |         0.00 |      10.50
//! IdxScan   | items_pkey |    5 |         0.10 |       2.30
//!
//! Parameterized Path List:
//! Scan Type | Index Name | Rows | Startup Cost | Total Cost | Required Outer
//! ...
//! ```
//!
//! Only non-empty lists get a section. Partition separators become empty
//! rows. The layout is plain data so it can be checked without a workbook.

use std::collections::{BTreeMap, HashSet};

use pgpath_analyzer::{AliasReport, PathList, PathRecord, PathRow};

/// Column widths shared by every sheet
pub const COLUMN_WIDTHS: [f64; 5] = [12.0, 40.0, 10.0, 15.0, 15.0];

/// Width of the `Required Outer` column
pub const REQUIRED_OUTER_WIDTH: f64 = 25.0;

/// Spreadsheet limit on sheet name length, in characters
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

const COLUMN_HEADERS: [&str; 5] = ["Scan Type", "Index Name", "Rows", "Startup Cost", "Total Cost"];

/// A single worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }
}

/// Options that shape the sheet contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetOptions {
    /// Emit the parameterized path list and its `Required Outer` column
    pub include_parameterized: bool,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            include_parameterized: true,
        }
    }
}

/// Cell grid and column widths of one worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// Sanitized worksheet name
    pub name: String,
    /// Alias the sheet was built for
    pub alias: String,
    pub column_widths: Vec<f64>,
    /// Rows top to bottom; an empty row is left blank
    pub rows: Vec<Vec<Cell>>,
}

impl SheetLayout {
    /// Lays out the report of one alias
    pub fn build(alias: &str, name: String, report: &AliasReport, options: SheetOptions) -> Self {
        let mut rows = vec![vec![Cell::text(format!("Table: {alias}"))]];
        let mut column_widths = COLUMN_WIDTHS.to_vec();

        for list in PathList::ALL {
            if list == PathList::Parameterized && !options.include_parameterized {
                continue;
            }
            let entries = report.rows(list);
            if entries.is_empty() {
                continue;
            }

            let with_outer = list == PathList::Parameterized;
            if with_outer {
                column_widths.push(REQUIRED_OUTER_WIDTH);
            }

            rows.push(vec![Cell::text(list.label())]);
            let mut header: Vec<Cell> = COLUMN_HEADERS.iter().map(|h| Cell::text(*h)).collect();
            if with_outer {
                header.push(Cell::text("Required Outer"));
            }
            rows.push(header);

            for entry in entries {
                match entry {
                    PathRow::Path(record) => rows.push(record_cells(record, with_outer)),
                    PathRow::Separator => rows.push(Vec::new()),
                }
            }
            rows.push(Vec::new());
        }

        Self {
            name,
            alias: alias.to_string(),
            column_widths,
            rows,
        }
    }
}

fn record_cells(record: &PathRecord, with_outer: bool) -> Vec<Cell> {
    let mut cells = vec![
        Cell::text(record.scan_type.as_str()),
        Cell::text(record.index_name.clone().unwrap_or_default()),
        Cell::Number(record.rows as f64),
        Cell::Number(record.startup_cost),
        Cell::Number(record.total_cost),
    ];
    if with_outer {
        cells.push(Cell::text(record.required_outer.clone().unwrap_or_default()));
    }
    cells
}

/// Lays out one sheet per alias, in alias order
pub fn layout_workbook(
    reports: &BTreeMap<String, AliasReport>,
    options: SheetOptions,
) -> Vec<SheetLayout> {
    let mut names = SheetNames::default();
    reports
        .iter()
        .map(|(alias, report)| SheetLayout::build(alias, names.allocate(alias), report, options))
        .collect()
}

/// Makes an alias usable as a worksheet name.
///
/// Forbidden characters become `_`, leading and trailing apostrophes are
/// dropped and the result is cut to the length limit.
pub fn sanitize_sheet_name(alias: &str) -> String {
    let replaced: String = alias
        .chars()
        .map(|c| {
            if FORBIDDEN_SHEET_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed: String = replaced
        .trim_matches('\'')
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect();

    if trimmed.is_empty() {
        "alias".to_string()
    } else {
        trimmed
    }
}

/// Hands out sanitized sheet names that are unique ignoring case
#[derive(Debug, Default)]
pub struct SheetNames {
    taken: HashSet<String>,
}

impl SheetNames {
    /// Returns a fresh name for `alias`, suffixed `~2`, `~3`, ... on collision
    pub fn allocate(&mut self, alias: &str) -> String {
        let base = sanitize_sheet_name(alias);
        if self.taken.insert(base.to_lowercase()) {
            return base;
        }

        let mut n = 2usize;
        loop {
            let suffix = format!("~{n}");
            let keep = MAX_SHEET_NAME_LEN - suffix.chars().count();
            let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
            if self.taken.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests;
