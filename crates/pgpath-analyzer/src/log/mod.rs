//! Planner Debug Log Module
//!
//! A planner built with path debugging prints one `RELOPTINFO` section per
//! relation and join it plans:
//!
//! ```text
//! RELOPTINFO (I): rows=5 width=40
//!     path list:
//!     SeqScan(dct_items) rows=5 cost=0.00..10.50
//!     IdxScan(dct_items) rows=5 cost=0.10..2.30
//!     index name: items_pkey
//!     cheapest parameterized paths:
//!     ...
//! RELOPTINFO (I C): rows=12 width=80
//!     ...
//! ```
//!
//! Sections are not closed explicitly; a section ends where the next header
//! starts. [`scanner`] isolates the sections of base relations, [`path_line`]
//! extracts path records from them.

pub mod path_line;
pub mod scanner;

pub use path_line::{
    CollectedPaths, PathLine, PathLineError, PathLineParser, collect_paths, parse_path_line,
};
pub use scanner::{
    CHEAPEST_PATH_MARKERS, LogBlock, LogScanner, RelOptHeader, ScanState, scan_log,
};
