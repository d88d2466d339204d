//! Tests for workbook rendering

use super::*;
use crate::sheet::{SheetOptions, layout_workbook};
use pgpath_analyzer::{AliasReport, PathRecord, PathRow, ScanType};
use std::collections::BTreeMap;

fn reports() -> BTreeMap<String, AliasReport> {
    let mut reports = BTreeMap::new();
    reports.insert(
        "I".to_string(),
        AliasReport {
            path_list: vec![PathRow::Path(PathRecord::new(
                ScanType::SeqScan,
                5,
                0.0,
                10.5,
            ))],
            ..Default::default()
        },
    );
    reports.insert("J".to_string(), AliasReport::default());
    reports
}

#[test]
fn test_renders_xlsx_container() {
    let sheets = layout_workbook(&reports(), SheetOptions::default());
    let bytes = workbook_bytes(&sheets).unwrap();

    // xlsx files are zip archives
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_rendering_is_deterministic() {
    let sheets = layout_workbook(&reports(), SheetOptions::default());
    assert_eq!(
        workbook_bytes(&sheets).unwrap(),
        workbook_bytes(&sheets).unwrap()
    );
}
