//! Run summary formatting

use anyhow::Result;
use comfy_table::{Table, presets::UTF8_FULL};

use crate::commands::analyze::{PlanOutcome, PlanStatus};

/// Prints the outcome of every plan file to stdout
pub fn print_summary(outcomes: &[PlanOutcome], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcomes)?);
    } else {
        println!("{}", format_summary(outcomes));
    }
    Ok(())
}

/// Formats outcomes as a table
pub fn format_summary(outcomes: &[PlanOutcome]) -> String {
    if outcomes.is_empty() {
        return "(no plan files)".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["File", "Status", "Aliases", "Paths", "Outputs"]);

    for outcome in outcomes {
        let row = match &outcome.status {
            PlanStatus::Written {
                aliases,
                paths,
                outputs,
            } => vec![
                outcome.file.clone(),
                "written".to_string(),
                aliases.to_string(),
                paths.to_string(),
                outputs
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join("\n"),
            ],
            PlanStatus::Skipped { reason } => vec![
                outcome.file.clone(),
                "skipped".to_string(),
                String::new(),
                String::new(),
                reason.clone(),
            ],
            PlanStatus::Failed { error } => vec![
                outcome.file.clone(),
                "failed".to_string(),
                String::new(),
                String::new(),
                error.clone(),
            ],
        };
        table.add_row(row);
    }

    table.to_string()
}
