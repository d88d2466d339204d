//! Query EXPLAIN Parser Module
//!
//! Reads PostgreSQL `EXPLAIN (FORMAT JSON)` output far enough to know which base
//! relations a query scans. Only the fields needed for that are modelled; every
//! other plan property is ignored.
//!
//! # Example
//!
//! ```
//! use pgpath_analyzer::explain::collect_base_aliases;
//!
//! let json = r#"{"Plan": {"Node Type": "Hash Join", "Plans": [
//!     {"Node Type": "Seq Scan", "Relation Name": "items", "Alias": "i"},
//!     {"Node Type": "Hash", "Plans": [
//!         {"Node Type": "Seq Scan", "Relation Name": "classes", "Alias": "c"}
//!     ]}
//! ]}}"#;
//!
//! let aliases = collect_base_aliases(json).unwrap();
//! assert_eq!(aliases.into_iter().collect::<Vec<_>>(), vec!["c", "i"]);
//! ```

pub mod plan;
pub mod postgres;

pub use plan::{PlanNode, PlanNodeIterator};
pub use postgres::{PlanError, base_aliases, collect_base_aliases, parse_json_explain};
