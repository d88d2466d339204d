//! Query Plan Model - the slice of an execution plan pgpath cares about

use serde::{Deserialize, Serialize};

/// A single node of a PostgreSQL execution plan tree
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanNode {
    /// Type of operation this node performs (e.g. "Seq Scan")
    #[serde(rename = "Node Type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// Relation/table name (if applicable)
    #[serde(rename = "Relation Name", default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    /// Alias used in the query (if applicable)
    #[serde(rename = "Alias", default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Child nodes
    #[serde(rename = "Plans", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PlanNode>,
}

impl PlanNode {
    /// Creates a new plan node with the given type
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: Some(node_type.into()),
            ..Self::default()
        }
    }

    /// Sets the relation/table name
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    /// Sets the alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds a child node
    pub fn with_child(mut self, child: PlanNode) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the alias when this node scans a base relation.
    ///
    /// A node is a base relation node iff it carries both a relation name and an alias.
    pub fn base_alias(&self) -> Option<&str> {
        match (&self.relation, &self.alias) {
            (Some(_), Some(alias)) => Some(alias),
            _ => None,
        }
    }

    /// Returns an iterator over this node and all its descendants (depth-first)
    pub fn iter(&self) -> PlanNodeIterator<'_> {
        PlanNodeIterator::new(self)
    }
}

/// Depth-first iterator over plan nodes
pub struct PlanNodeIterator<'a> {
    stack: Vec<&'a PlanNode>,
}

impl<'a> PlanNodeIterator<'a> {
    fn new(root: &'a PlanNode) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for PlanNodeIterator<'a> {
    type Item = &'a PlanNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order so we visit them in order
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}
