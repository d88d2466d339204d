//! `pgpath stage`: fan a staging directory out into one directory per plan
//!
//! ```text
//! staging/                         out/
//!   q1.json                          q1/
//!   q2.json             ──►            q1.json
//!   postgresql-0501.log                q1_postgresql-0502.log
//!   postgresql-0502.log                q1_pathcost.txt
//!                                      q1_path_cost_info.xlsx
//!                                    q2/
//!                                      ...
//! ```
//!
//! The newest log (last by file name) is the one correlated. An existing
//! per-plan directory is never reused; `q1_1`, `q1_2`, ... are taken instead.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use globset::GlobMatcher;
use pgpath_interchange::{ReportExporter, SheetOptions, make_unique_dir};

use super::analyze::{PlanOutcome, analyze_plan_file, file_name, plan_files, read_log};
use crate::output::print_summary;
use crate::settings::PgpathSettings;

#[derive(Args, Debug)]
pub struct StageArgs {
    /// Directory holding plan files and planner logs
    pub staging_dir: PathBuf,

    /// Root for the per-plan directories (defaults to the staging directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep the planner logs in the staging directory
    #[arg(long)]
    pub keep_logs: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Planner log and plans found in a staging directory
#[derive(Debug)]
pub struct StagingPlan {
    pub log: PathBuf,
    /// Every matching log, oldest first
    pub logs: Vec<PathBuf>,
    pub plans: Vec<PathBuf>,
}

pub fn run(args: &StageArgs, settings: &PgpathSettings) -> Result<()> {
    let matcher = settings.log_matcher()?;
    let staging = discover(
        &args.staging_dir,
        &matcher,
        &settings.analysis.plan_extension,
    )?;

    let log_text = read_log(&staging.log)?;
    let out_root = args
        .output
        .clone()
        .unwrap_or_else(|| args.staging_dir.clone());
    let options = SheetOptions {
        include_parameterized: settings.analysis.include_parameterized,
    };

    tracing::info!(
        plans = staging.plans.len(),
        log = %staging.log.display(),
        "staging plan files"
    );

    let outcomes: Vec<PlanOutcome> = staging
        .plans
        .iter()
        .map(|plan| stage_plan(plan, &staging.log, &log_text, &out_root, options))
        .collect();

    if settings.staging.remove_source_logs && !args.keep_logs {
        remove_logs(&staging.logs);
    }

    print_summary(&outcomes, args.json)?;
    super::fail_on_errors(&outcomes)
}

/// Finds the log to correlate and the plans to stage
pub fn discover(dir: &Path, matcher: &GlobMatcher, plan_extension: &str) -> Result<StagingPlan> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list staging directory {:?}", dir))?;

    let mut logs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.file_name().is_some_and(|name| matcher.is_match(name)) {
            logs.push(path);
        }
    }
    logs.sort();

    let Some(log) = logs.last().cloned() else {
        bail!(
            "No planner log matching {:?} in {:?}",
            matcher.glob().glob(),
            dir
        );
    };

    Ok(StagingPlan {
        log,
        logs,
        plans: plan_files(dir, plan_extension)?,
    })
}

/// Moves one plan into a fresh directory with a copy of the log, then analyzes it there
pub fn stage_plan(
    plan: &Path,
    log: &Path,
    log_text: &str,
    out_root: &Path,
    options: SheetOptions,
) -> PlanOutcome {
    match prepare_target(plan, log, out_root) {
        Ok(staged) => {
            let target = staged.parent().map(Path::to_path_buf).unwrap_or_default();
            let exporter = ReportExporter::new(target).with_options(options);
            analyze_plan_file(&staged, log_text, &exporter)
        }
        Err(e) => {
            tracing::error!(plan = %plan.display(), error = %e, "failed to stage plan");
            PlanOutcome::failed(plan, format!("{e:#}"))
        }
    }
}

/// Returns the new location of the plan file
fn prepare_target(plan: &Path, log: &Path, out_root: &Path) -> Result<PathBuf> {
    let stem = plan
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = make_unique_dir(&out_root.join(&stem))
        .with_context(|| format!("Failed to create directory for {stem}"))?;

    let staged = target.join(file_name(plan));
    move_file(plan, &staged)?;

    let log_copy = target.join(format!("{stem}_{}", file_name(log)));
    std::fs::copy(log, &log_copy)
        .with_context(|| format!("Failed to copy planner log to {:?}", log_copy))?;

    tracing::debug!(target = %target.display(), "staged plan");
    Ok(staged)
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    // Rename fails across filesystems
    std::fs::copy(from, to).with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
    std::fs::remove_file(from).with_context(|| format!("Failed to remove {:?}", from))?;
    Ok(())
}

fn remove_logs(logs: &[PathBuf]) {
    for log in logs {
        match std::fs::remove_file(log) {
            Ok(()) => tracing::info!(log = %log.display(), "removed planner log"),
            Err(e) => tracing::warn!(log = %log.display(), error = %e, "failed to remove planner log"),
        }
    }
}
