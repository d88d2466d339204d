//! pgpath Analyzer - Planner path-cost correlation
//!
//! This crate provides functionality for:
//! - Collecting the base relation aliases scanned by a PostgreSQL EXPLAIN (FORMAT JSON) plan
//! - Normalizing partition aliases to their parent table alias
//! - Isolating the `RELOPTINFO` blocks of a planner debug log for those aliases
//! - Extracting, deduplicating and grouping the access paths the planner considered
//!
//! # Example
//!
//! ```
//! use pgpath_analyzer::{analyze, ScanType};
//!
//! let plan = r#"[{"Plan": {"Node Type": "Seq Scan", "Relation Name": "dct_items", "Alias": "I"}}]"#;
//! let log = "RELOPTINFO (I): rows=5 width=40\n\tpath list:\n\tSeqScan(dct_items) rows=5 cost=0.00..10.50\n";
//!
//! let analysis = analyze(plan, log).unwrap();
//! let report = &analysis.reports["I"];
//! assert_eq!(report.path_list.len(), 1);
//! assert_eq!(report.path_list[0].record().unwrap().scan_type, ScanType::SeqScan);
//! ```

pub mod alias;
pub mod explain;
pub mod log;
pub mod pathcost_text;
pub mod paths;
pub mod pipeline;

pub use alias::{canonical, canonical_set, is_partition_alias};
pub use explain::*;
pub use log::*;
pub use pathcost_text::{format_pathcost_text, parse_pathcost_text};
pub use paths::*;
pub use pipeline::{Analysis, analyze, analyze_plan, build_reports, correlate};
