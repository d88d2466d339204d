//! Runs the pgpath binary end to end

use std::process::Command;

const PLAN: &str = r#"[{"Plan": {"Node Type": "Seq Scan", "Relation Name": "dct_items", "Alias": "I"}}]"#;
const LOG: &str = "RELOPTINFO (I): rows=5 width=40\n\tpath list:\n\tSeqScan(dct_items) rows=5 cost=0.00..10.50\n";

fn pgpath() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pgpath"));
    cmd.env_remove("RUST_LOG").env_remove("PGPATH_CONFIG");
    cmd
}

#[test]
fn test_analyze_then_convert() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("q1.json"), PLAN).unwrap();
    std::fs::write(dir.path().join("planner.log"), LOG).unwrap();

    let output = pgpath()
        .current_dir(dir.path())
        .args(["--quiet", "analyze", ".", "--log", "planner.log", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary[0]["file"], "q1.json");
    assert_eq!(summary[0]["status"], "written");
    assert_eq!(summary[0]["paths"], 1);

    let text = dir.path().join("q1_pathcost.txt");
    assert!(
        std::fs::read_to_string(&text)
            .unwrap()
            .starts_with("===== RELOPTINFO for alias: I =====\n")
    );

    let converted = dir.path().join("converted");
    let status = pgpath()
        .args(["--quiet", "convert"])
        .arg(&text)
        .arg("--output")
        .arg(&converted)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(converted.join("q1_path_cost_info.xlsx").is_file());
}

#[test]
fn test_missing_log_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("q1.json"), PLAN).unwrap();

    let output = pgpath()
        .current_dir(dir.path())
        .args(["analyze", ".", "--log", "missing.log"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}
