//! `pgpath analyze`: correlate plan files with a planner log

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use pgpath_analyzer::{collect_base_aliases, correlate};
use pgpath_interchange::{ReportExporter, SheetOptions};
use serde::Serialize;

use crate::output::print_summary;
use crate::settings::PgpathSettings;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Plan file, or directory of plan files
    pub input: PathBuf,

    /// Planner debug log; a bare name is looked up in the plan directory
    #[arg(short, long)]
    pub log: PathBuf,

    /// Directory for the artifacts (defaults to the plan directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Leave the parameterized path list out of spreadsheets
    #[arg(long)]
    pub no_parameterized: bool,
}

/// What happened to one plan file
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanOutcome {
    pub file: String,
    #[serde(flatten)]
    pub status: PlanStatus,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanStatus {
    Written {
        aliases: usize,
        paths: usize,
        outputs: Vec<PathBuf>,
    },
    Skipped {
        reason: String,
    },
    Failed {
        error: String,
    },
}

impl PlanOutcome {
    fn new(plan: &Path, status: PlanStatus) -> Self {
        Self {
            file: file_name(plan),
            status,
        }
    }

    pub(crate) fn failed(plan: &Path, error: impl ToString) -> Self {
        Self::new(
            plan,
            PlanStatus::Failed {
                error: error.to_string(),
            },
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, PlanStatus::Failed { .. })
    }
}

pub fn run(args: &AnalyzeArgs, settings: &PgpathSettings) -> Result<()> {
    let plan_dir = if args.input.is_dir() {
        args.input.clone()
    } else {
        args.input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    };

    let log_path = resolve_log(&plan_dir, &args.log);
    let log_text = read_log(&log_path)?;

    let plans = if args.input.is_dir() {
        plan_files(&args.input, &settings.analysis.plan_extension)?
    } else {
        vec![args.input.clone()]
    };

    let output_dir = args.output.clone().unwrap_or(plan_dir);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    let exporter = ReportExporter::new(&output_dir).with_options(SheetOptions {
        include_parameterized: settings.analysis.include_parameterized && !args.no_parameterized,
    });

    tracing::info!(
        plans = plans.len(),
        log = %log_path.display(),
        output = %output_dir.display(),
        "analyzing plan files"
    );

    let outcomes: Vec<PlanOutcome> = plans
        .iter()
        .map(|plan| analyze_plan_file(plan, &log_text, &exporter))
        .collect();

    print_summary(&outcomes, args.json)?;
    super::fail_on_errors(&outcomes)
}

/// Resolves a relative log path against the plan directory first
pub fn resolve_log(plan_dir: &Path, log: &Path) -> PathBuf {
    if log.is_relative() {
        let candidate = plan_dir.join(log);
        if candidate.exists() {
            return candidate;
        }
    }
    log.to_path_buf()
}

/// Reads a planner log; invalid UTF-8 (statement text in other encodings)
/// is replaced rather than rejected
pub fn read_log(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read planner log {:?}", path))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Lists the plan files of a directory in file name order
pub fn plan_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list plan directory {:?}", dir))?;

    let mut plans = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            plans.push(path);
        }
    }
    plans.sort();
    Ok(plans)
}

/// Analyzes one plan file against an already loaded log.
///
/// Never fails the batch: unreadable files and export errors become a
/// `Failed` outcome, plans without base relations a `Skipped` one.
pub fn analyze_plan_file(plan: &Path, log_text: &str, exporter: &ReportExporter) -> PlanOutcome {
    let plan_json = match std::fs::read_to_string(plan) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(plan = %plan.display(), error = %e, "failed to read plan file");
            return PlanOutcome::failed(plan, e);
        }
    };

    let aliases = match collect_base_aliases(&plan_json) {
        Ok(aliases) => aliases,
        Err(e) => {
            tracing::warn!(plan = %plan.display(), error = %e, "unsupported plan shape, skipping");
            return PlanOutcome::new(
                plan,
                PlanStatus::Skipped {
                    reason: e.to_string(),
                },
            );
        }
    };
    if aliases.is_empty() {
        tracing::warn!(plan = %plan.display(), "plan scans no base relations, skipping");
        return PlanOutcome::new(
            plan,
            PlanStatus::Skipped {
                reason: "no base relations in plan".to_string(),
            },
        );
    }

    let analysis = correlate(aliases, log_text);
    let stem = plan
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match exporter.export(&stem, &analysis) {
        Ok(files) => PlanOutcome::new(
            plan,
            PlanStatus::Written {
                aliases: analysis.reports.len(),
                paths: analysis.path_count(),
                outputs: vec![files.text, files.workbook],
            },
        ),
        Err(e) => {
            tracing::error!(plan = %plan.display(), error = %e, "failed to write reports");
            PlanOutcome::failed(plan, e)
        }
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
