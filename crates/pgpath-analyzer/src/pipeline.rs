//! Plan-to-report pipeline
//!
//! ```text
//! plan JSON ──► base aliases ──► canonical aliases ──┐
//!                                                    ▼
//! planner log ─────────────────────────────► LogScanner ──► LogBlock per alias
//!                                                                │
//!                                   PathLineParser + assemble ◄──┘
//!                                                │
//!                                                ▼
//!                                     AliasReport per alias
//! ```
//!
//! Every stage is a pure function of its inputs; the same plan and log
//! always produce the same blocks and reports.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::alias::canonical_set;
use crate::explain::postgres::{self, PlanError};
use crate::explain::plan::PlanNode;
use crate::log::path_line::collect_paths;
use crate::log::scanner::{LogBlock, scan_log};
use crate::paths::AliasReport;

/// Everything extracted for one plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Analysis {
    /// Aliases as they appear in the plan
    pub plan_aliases: BTreeSet<String>,
    /// Captured log lines per canonical alias
    pub blocks: BTreeMap<String, LogBlock>,
    /// Assembled path lists per canonical alias
    pub reports: BTreeMap<String, AliasReport>,
}

impl Analysis {
    /// Canonical aliases, in report order
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    /// Number of paths across all aliases
    pub fn path_count(&self) -> usize {
        self.reports.values().map(AliasReport::path_count).sum()
    }
}

/// Runs the whole pipeline on a plan document and a planner log
pub fn analyze(plan_json: &str, log_text: &str) -> Result<Analysis, PlanError> {
    let aliases = postgres::collect_base_aliases(plan_json)?;
    Ok(correlate(aliases, log_text))
}

/// Runs the pipeline on an already parsed plan
pub fn analyze_plan(root: &PlanNode, log_text: &str) -> Analysis {
    correlate(postgres::base_aliases(root), log_text)
}

/// Correlates plan aliases with the planner log
pub fn correlate(plan_aliases: BTreeSet<String>, log_text: &str) -> Analysis {
    let requested = canonical_set(&plan_aliases);
    let blocks = scan_log(log_text, &requested);
    let reports = build_reports(&blocks);

    tracing::debug!(
        aliases = requested.len(),
        captured_lines = blocks.values().map(|b| b.lines.len()).sum::<usize>(),
        "correlated plan with planner log"
    );

    Analysis {
        plan_aliases,
        blocks,
        reports,
    }
}

/// Parses and assembles the path lists of every block
pub fn build_reports(blocks: &BTreeMap<String, LogBlock>) -> BTreeMap<String, AliasReport> {
    blocks
        .iter()
        .map(|(alias, block)| (alias.clone(), collect_paths(block).into_report()))
        .collect()
}

#[cfg(test)]
mod tests;
