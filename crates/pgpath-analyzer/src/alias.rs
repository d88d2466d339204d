//! Alias normalization for partitioned tables
//!
//! The planner names every partition it expands after the partition itself
//! (`items_p3`, `items_part3`, `items_12`). Path output is grouped by the
//! parent table, so those names are collapsed to their canonical form by
//! stripping one trailing `_<part|p>?<digits>` suffix.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static PARTITION_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)_(?:part|p)?\d+$").expect("valid regex"));

/// Returns the canonical (parent table) form of an alias.
///
/// The suffix is stripped once; aliases without a partition suffix come back unchanged.
///
/// ```
/// use pgpath_analyzer::canonical;
///
/// assert_eq!(canonical("ITEMS_part3"), "ITEMS");
/// assert_eq!(canonical("ITEMS_p7"), "ITEMS");
/// assert_eq!(canonical("ITEMS_12"), "ITEMS");
/// assert_eq!(canonical("ITEMS"), "ITEMS");
/// ```
pub fn canonical(alias: &str) -> &str {
    match PARTITION_SUFFIX_REGEX.captures(alias) {
        Some(caps) => caps.get(1).map_or(alias, |m| m.as_str()),
        None => alias,
    }
}

/// Returns true if the alias carries a partition suffix
pub fn is_partition_alias(alias: &str) -> bool {
    canonical(alias) != alias
}

/// Canonicalizes every alias of a set
pub fn canonical_set<'a, I>(aliases: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    aliases
        .into_iter()
        .map(|alias| canonical(alias).to_string())
        .collect()
}
