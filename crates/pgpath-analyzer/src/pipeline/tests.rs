//! Tests for the plan-to-report pipeline

use super::*;
use crate::paths::{PathRecord, PathRow, ScanType};
use indoc::indoc;
use pretty_assertions::assert_eq;

const ITEMS_PLAN: &str = indoc! {r#"
    [
      {
        "Plan": {
          "Node Type": "Seq Scan",
          "Relation Name": "dct_items",
          "Alias": "I"
        }
      }
    ]
"#};

const ITEMS_LOG: &str = indoc! {"
    RELOPTINFO (I): rows=5 width=40
        path list:
        SeqScan(dct_items) rows=5 cost=0.00..10.50
        IdxScan(dct_items) rows=5 cost=0.10..2.30
        index name: items_pkey
"};

#[test]
fn test_single_relation_end_to_end() {
    let analysis = analyze(ITEMS_PLAN, ITEMS_LOG).unwrap();

    assert_eq!(analysis.aliases().collect::<Vec<_>>(), vec!["I"]);
    let report = &analysis.reports["I"];
    assert_eq!(
        report.path_list,
        vec![
            PathRow::Path(PathRecord::new(ScanType::SeqScan, 5, 0.0, 10.5)),
            PathRow::Path(
                PathRecord::new(ScanType::IdxScan, 5, 0.1, 2.3).with_index("items_pkey")
            ),
        ]
    );
    assert!(report.partial_path_list.is_empty());
    assert!(report.parameterized_path_list.is_empty());
    assert_eq!(analysis.path_count(), 2);
}

#[test]
fn test_join_section_contributes_nothing() {
    let plan = indoc! {r#"
        {"Plan": {"Node Type": "Nested Loop", "Plans": [
            {"Node Type": "Seq Scan", "Relation Name": "dct_items", "Alias": "I"},
            {"Node Type": "Seq Scan", "Relation Name": "dct_jobs", "Alias": "J"}
        ]}}
    "#};
    let log = indoc! {"
        RELOPTINFO (I J): rows=12 width=80
            path list:
            SeqScan(dct_items) rows=12 cost=0.00..99.00
        RELOPTINFO (J): rows=3 width=20
            path list:
            SeqScan(dct_jobs) rows=3 cost=0.00..1.03
    "};

    let analysis = analyze(plan, log).unwrap();

    assert!(analysis.reports["I"].is_empty());
    assert!(analysis.blocks["I"].is_empty());
    assert_eq!(
        analysis.reports["J"].path_list,
        vec![PathRow::Path(PathRecord::new(ScanType::SeqScan, 3, 0.0, 1.03))]
    );
}

#[test]
fn test_partition_aliases_collapse_into_parent() {
    let plan = indoc! {r#"
        [{"Plan": {"Node Type": "Append", "Plans": [
            {"Node Type": "Seq Scan", "Relation Name": "items_p1", "Alias": "items_p1"},
            {"Node Type": "Seq Scan", "Relation Name": "items_p2", "Alias": "items_p2"}
        ]}}]
    "#};
    let log = indoc! {"
        RELOPTINFO (items_p1): rows=10 width=40
            path list:
            IdxScan(items_p1) rows=10 cost=0.10..4.00
            index name: items_idx_p1
        RELOPTINFO (items_p2): rows=12 width=40
            path list:
            IdxScan(items_p2) rows=12 cost=0.10..5.00
            index name: items_idx_p2
    "};

    let analysis = analyze(plan, log).unwrap();

    assert_eq!(analysis.plan_aliases.len(), 2);
    assert_eq!(analysis.aliases().collect::<Vec<_>>(), vec!["items"]);
    assert_eq!(
        analysis.reports["items"].path_list,
        vec![
            PathRow::Path(
                PathRecord::new(ScanType::IdxScan, 10, 0.1, 4.0).with_index("items_idx_p1")
            ),
            PathRow::Separator,
            PathRow::Path(
                PathRecord::new(ScanType::IdxScan, 12, 0.1, 5.0).with_index("items_idx_p2")
            ),
        ]
    );
}

#[test]
fn test_missing_alias_in_log_gives_empty_report() {
    let analysis = analyze(ITEMS_PLAN, "LOG:  statement: SELECT 1\n").unwrap();

    assert!(analysis.blocks["I"].is_empty());
    assert!(analysis.reports["I"].is_empty());
}

#[test]
fn test_invalid_plan_is_an_error() {
    assert!(matches!(
        analyze("not json", ITEMS_LOG),
        Err(PlanError::InvalidJson(_))
    ));
}

#[test]
fn test_plan_without_aliases_yields_nothing() {
    let plan = r#"[{"Plan": {"Node Type": "Result"}}]"#;
    let analysis = analyze(plan, ITEMS_LOG).unwrap();

    assert!(analysis.plan_aliases.is_empty());
    assert!(analysis.reports.is_empty());
}

#[test]
fn test_repeated_runs_are_identical() {
    let first = analyze(ITEMS_PLAN, ITEMS_LOG).unwrap();
    let second = analyze(ITEMS_PLAN, ITEMS_LOG).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_analyze_plan_matches_analyze() {
    let root = crate::explain::parse_json_explain(ITEMS_PLAN).unwrap();
    assert_eq!(analyze_plan(&root, ITEMS_LOG), analyze(ITEMS_PLAN, ITEMS_LOG).unwrap());
}

#[test]
fn test_build_reports_from_reread_blocks() {
    let analysis = analyze(ITEMS_PLAN, ITEMS_LOG).unwrap();
    let text = crate::pathcost_text::format_pathcost_text(&analysis.blocks);
    let blocks = crate::pathcost_text::parse_pathcost_text(&text);

    assert_eq!(build_reports(&blocks), analysis.reports);
}
