//! `_pathcost.txt` artifact
//!
//! The text artifact is the audit trail of a run: the raw lines captured for
//! every alias, in alias order.
//!
//! ```text
//! ===== RELOPTINFO for alias: I =====
//! RELOPTINFO (I): rows=5 width=40
//!     path list:
//!     SeqScan(dct_items) rows=5 cost=0.00..10.50
//!
//! ===== RELOPTINFO for alias: J =====
//!
//! ```
//!
//! Reading it back yields the same blocks, so spreadsheets can be rebuilt
//! from an old artifact without the original log.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::log::scanner::LogBlock;

static ALIAS_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^===== RELOPTINFO for alias: (.+?) =====$").expect("valid regex")
});

/// Renders captured blocks as a pathcost text artifact
pub fn format_pathcost_text(blocks: &BTreeMap<String, LogBlock>) -> String {
    let mut out = String::new();
    for (alias, block) in blocks {
        out.push_str(&format!("===== RELOPTINFO for alias: {alias} =====\n"));
        for line in &block.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Reads a pathcost text artifact back into blocks
pub fn parse_pathcost_text(text: &str) -> BTreeMap<String, LogBlock> {
    let mut blocks: BTreeMap<String, LogBlock> = BTreeMap::new();
    let mut current: Option<LogBlock> = None;

    for line in text.lines() {
        if let Some(caps) = ALIAS_HEADER_REGEX.captures(line) {
            if let Some(block) = current.take() {
                close_block(&mut blocks, block);
            }
            current = Some(LogBlock::new(&caps[1]));
        } else if let Some(block) = current.as_mut() {
            block.lines.push(line.to_string());
        }
    }
    if let Some(block) = current {
        close_block(&mut blocks, block);
    }
    blocks
}

fn close_block(blocks: &mut BTreeMap<String, LogBlock>, mut block: LogBlock) {
    // Drop the blank separator line
    if block.lines.last().is_some_and(|l| l.is_empty()) {
        block.lines.pop();
    }
    blocks
        .entry(block.alias.clone())
        .or_insert_with(|| LogBlock::new(block.alias.clone()))
        .lines
        .extend(block.lines);
}
