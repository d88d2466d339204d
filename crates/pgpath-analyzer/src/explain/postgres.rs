//! PostgreSQL EXPLAIN Parser
//!
//! Parses `EXPLAIN (FORMAT JSON)` output. PostgreSQL wraps the plan in a
//! one-element array; documents saved by other tools often keep only the
//! inner object. Both shapes are accepted:
//!
//! ```text
//! [ { "Plan": { ... } } ]
//! { "Plan": { ... } }
//! ```

use std::collections::BTreeSet;

use serde_json::Value;
use thiserror::Error;

use crate::explain::plan::PlanNode;

/// Errors that can occur when parsing PostgreSQL EXPLAIN output
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unsupported plan shape: no Plan object at the top level")]
    MissingPlan,

    #[error("Invalid plan structure: {0}")]
    InvalidStructure(String),
}

/// Result type for EXPLAIN parsing
pub type Result<T> = std::result::Result<T, PlanError>;

/// Parses PostgreSQL EXPLAIN (FORMAT JSON) output into its root plan node
pub fn parse_json_explain(json: &str) -> Result<PlanNode> {
    let value: Value = serde_json::from_str(json)?;

    let plan_obj = if let Some(arr) = value.as_array() {
        arr.first()
            .and_then(|v| v.get("Plan"))
            .ok_or(PlanError::MissingPlan)?
    } else if let Some(plan) = value.get("Plan") {
        plan
    } else {
        return Err(PlanError::MissingPlan);
    };

    if !plan_obj.is_object() {
        return Err(PlanError::MissingPlan);
    }

    PlanNode::deserialize_value(plan_obj)
}

/// Collects the aliases of every base relation scanned by the plan.
///
/// Aliases are returned verbatim; partition suffixes are not stripped here.
pub fn collect_base_aliases(json: &str) -> Result<BTreeSet<String>> {
    let root = parse_json_explain(json)?;
    Ok(base_aliases(&root))
}

/// Walks a plan tree and gathers the alias of every base relation node
pub fn base_aliases(root: &PlanNode) -> BTreeSet<String> {
    root.iter()
        .filter_map(PlanNode::base_alias)
        .map(str::to_string)
        .collect()
}

impl PlanNode {
    fn deserialize_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| PlanError::InvalidStructure(e.to_string()))
    }
}
