//! Path records and their assembly into per-alias reports

pub mod assembler;
pub mod record;

pub use assembler::{assemble, partition_id};
pub use record::{AliasReport, PathList, PathRecord, PathRow, ScanType};
