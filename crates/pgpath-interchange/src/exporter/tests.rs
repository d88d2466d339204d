//! Tests for artifact writing

use super::*;
use pgpath_analyzer::analyze;
use pretty_assertions::assert_eq;

const PLAN: &str = r#"[{"Plan": {"Node Type": "Seq Scan", "Relation Name": "dct_items", "Alias": "I"}}]"#;
const LOG: &str = "RELOPTINFO (I): rows=5 width=40\n\tpath list:\n\tSeqScan(dct_items) rows=5 cost=0.00..10.50\n";

#[test]
fn test_artifact_names() {
    let exporter = ReportExporter::new("/out");
    assert_eq!(exporter.text_path("q1"), PathBuf::from("/out/q1_pathcost.txt"));
    assert_eq!(
        exporter.workbook_path("q1"),
        PathBuf::from("/out/q1_path_cost_info.xlsx")
    );
}

#[test]
fn test_export_writes_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let analysis = analyze(PLAN, LOG).unwrap();

    let files = ReportExporter::new(dir.path()).export("q1", &analysis).unwrap();

    assert_eq!(
        std::fs::read_to_string(&files.text).unwrap(),
        format_pathcost_text(&analysis.blocks)
    );
    assert!(files.workbook.is_file());
}

#[test]
fn test_empty_reports_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = ReportExporter::new(dir.path()).write_workbook("q1", &BTreeMap::new());
    assert!(matches!(result, Err(ExportError::NoSheets)));
}
