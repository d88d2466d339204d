//! Path list assembly
//!
//! Each path list is deduplicated, then split into visual runs per physical
//! partition. The partition of a path is inferred from the digits at the end
//! of its index name; a sequential scan has no index, so it borrows the id of
//! its neighbour. That inference is a best-effort heuristic: it never inserts
//! a separator between two paths of the same inferred partition, but it can
//! miss a boundary next to a sequential scan.

use std::collections::HashSet;
use std::sync::LazyLock;

use ordered_float::OrderedFloat;
use regex::Regex;

use crate::paths::record::{PathRecord, PathRow, ScanType};

static PARTITION_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(?:part|p)?(\d+)$").expect("valid regex"));

/// Identity of a path for deduplication. `required_outer` is left out so the
/// same physical path seen with and without a parameterization counts once.
type PathKey = (
    ScanType,
    Option<String>,
    u64,
    OrderedFloat<f64>,
    OrderedFloat<f64>,
);

fn path_key(record: &PathRecord) -> PathKey {
    (
        record.scan_type,
        record.index_name.clone(),
        record.rows,
        OrderedFloat(record.startup_cost),
        OrderedFloat(record.total_cost),
    )
}

/// Deduplicates a path list and inserts partition separators.
///
/// The first occurrence of each path wins and keeps its position.
pub fn assemble<I>(records: I) -> Vec<PathRow>
where
    I: IntoIterator<Item = PathRecord>,
{
    let unique = dedup(records);
    let ids = inferred_partition_ids(&unique);

    let mut rows = Vec::with_capacity(unique.len());
    for (i, record) in unique.iter().enumerate() {
        if i > 0
            && let (Some(prev), Some(current)) = (ids[i - 1], ids[i])
            && prev != current
        {
            rows.push(PathRow::Separator);
        }
        rows.push(PathRow::Path(record.clone()));
    }
    rows
}

/// Extracts the partition id from the end of an index name.
///
/// ```
/// use pgpath_analyzer::partition_id;
///
/// assert_eq!(partition_id("items_p3"), Some("3"));
/// assert_eq!(partition_id("items_part12"), Some("12"));
/// assert_eq!(partition_id("items_pkey"), None);
/// ```
pub fn partition_id(index_name: &str) -> Option<&str> {
    PARTITION_ID_REGEX
        .captures(index_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn dedup<I>(records: I) -> Vec<PathRecord>
where
    I: IntoIterator<Item = PathRecord>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(path_key(record)))
        .collect()
}

fn inferred_partition_ids(records: &[PathRecord]) -> Vec<Option<&str>> {
    let own: Vec<Option<&str>> = records
        .iter()
        .map(|r| r.index_name.as_deref().and_then(partition_id))
        .collect();

    let mut resolved: Vec<Option<&str>> = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let id = if record.scan_type == ScanType::SeqScan && record.index_name.is_none() {
            match own.get(i + 1) {
                Some(next) => *next,
                None => resolved.last().copied().flatten(),
            }
        } else {
            own[i]
        };
        resolved.push(id);
    }
    resolved
}
