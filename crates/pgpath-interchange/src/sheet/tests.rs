//! Tests for sheet layout and naming

use super::*;
use pgpath_analyzer::ScanType;
use pretty_assertions::assert_eq;

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

fn header() -> Vec<Cell> {
    COLUMN_HEADERS.iter().map(|h| text(h)).collect()
}

mod layout {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_path_list_section() {
        let report = AliasReport {
            path_list: vec![
                PathRow::Path(PathRecord::new(ScanType::SeqScan, 5, 0.0, 10.5)),
                PathRow::Path(
                    PathRecord::new(ScanType::IdxScan, 5, 0.1, 2.3).with_index("items_pkey"),
                ),
            ],
            ..Default::default()
        };

        let sheet = SheetLayout::build("I", "I".to_string(), &report, SheetOptions::default());

        assert_eq!(sheet.column_widths, COLUMN_WIDTHS.to_vec());
        assert_eq!(
            sheet.rows,
            vec![
                vec![text("Table: I")],
                vec![text("Path List:")],
                header(),
                vec![
                    text("SeqScan"),
                    text(""),
                    Cell::Number(5.0),
                    Cell::Number(0.0),
                    Cell::Number(10.5),
                ],
                vec![
                    text("IdxScan"),
                    text("items_pkey"),
                    Cell::Number(5.0),
                    Cell::Number(0.1),
                    Cell::Number(2.3),
                ],
                vec![],
            ]
        );
    }

    #[test]
    fn test_empty_report_keeps_title() {
        let sheet = SheetLayout::build(
            "J",
            "J".to_string(),
            &AliasReport::default(),
            SheetOptions::default(),
        );
        assert_eq!(sheet.rows, vec![vec![text("Table: J")]]);
        assert_eq!(sheet.column_widths.len(), 5);
    }

    #[test]
    fn test_separator_becomes_empty_row() {
        let report = AliasReport {
            partial_path_list: vec![
                PathRow::Path(PathRecord::new(ScanType::SeqScan, 1, 0.0, 1.0)),
                PathRow::Separator,
                PathRow::Path(PathRecord::new(ScanType::SeqScan, 2, 0.0, 2.0)),
            ],
            ..Default::default()
        };

        let sheet = SheetLayout::build("t", "t".to_string(), &report, SheetOptions::default());

        assert_eq!(sheet.rows[1], vec![text("Partial Path List:")]);
        assert_eq!(sheet.rows[4], Vec::<Cell>::new());
        assert_eq!(sheet.rows.len(), 7);
    }

    #[test]
    fn test_parameterized_section_adds_column() {
        let report = AliasReport {
            parameterized_path_list: vec![PathRow::Path(
                PathRecord::new(ScanType::IdxScan, 1, 0.29, 8.31)
                    .with_index("items_class_idx")
                    .with_required_outer("C"),
            )],
            ..Default::default()
        };

        let sheet = SheetLayout::build("I", "I".to_string(), &report, SheetOptions::default());

        assert_eq!(sheet.column_widths.last(), Some(&REQUIRED_OUTER_WIDTH));
        assert_eq!(sheet.rows[1], vec![text("Parameterized Path List:")]);
        assert_eq!(sheet.rows[2].last(), Some(&text("Required Outer")));
        assert_eq!(sheet.rows[3].last(), Some(&text("C")));
    }

    #[test]
    fn test_parameterized_section_can_be_left_out() {
        let report = AliasReport {
            parameterized_path_list: vec![PathRow::Path(
                PathRecord::new(ScanType::IdxScan, 1, 0.29, 8.31).with_required_outer("C"),
            )],
            ..Default::default()
        };
        let options = SheetOptions {
            include_parameterized: false,
        };

        let sheet = SheetLayout::build("I", "I".to_string(), &report, options);

        assert_eq!(sheet.rows, vec![vec![text("Table: I")]]);
        assert_eq!(sheet.column_widths, COLUMN_WIDTHS.to_vec());
    }

    #[test]
    fn test_workbook_has_one_sheet_per_alias() {
        let mut reports = BTreeMap::new();
        reports.insert("J".to_string(), AliasReport::default());
        reports.insert("I".to_string(), AliasReport::default());

        let sheets = layout_workbook(&reports, SheetOptions::default());
        let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["I", "J"]);
    }
}

mod naming {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_alias_is_unchanged() {
        assert_eq!(sanitize_sheet_name("dct_items"), "dct_items");
    }

    #[test]
    fn test_forbidden_characters_are_replaced() {
        assert_eq!(sanitize_sheet_name("a[b]:c*d?e/f\\g"), "a_b__c_d_e_f_g");
        assert_eq!(sanitize_sheet_name("'quoted'"), "quoted");
        assert_eq!(sanitize_sheet_name("''"), "alias");
    }

    #[test]
    fn test_long_alias_is_truncated() {
        let alias = "x".repeat(40);
        assert_eq!(sanitize_sheet_name(&alias).len(), MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn test_names_are_unique_ignoring_case() {
        let mut names = SheetNames::default();
        assert_eq!(names.allocate("Items"), "Items");
        assert_eq!(names.allocate("items"), "items~2");
        assert_eq!(names.allocate("ITEMS"), "ITEMS~3");
    }

    #[test]
    fn test_suffix_respects_length_limit() {
        let mut names = SheetNames::default();
        let alias = "y".repeat(35);
        names.allocate(&alias);
        let second = names.allocate(&alias);
        assert_eq!(second.chars().count(), MAX_SHEET_NAME_LEN);
        assert!(second.ends_with("~2"));
    }
}
