//! Subcommand implementations

pub mod analyze;
pub mod convert;
pub mod stage;

use anyhow::{Result, bail};

use analyze::PlanOutcome;

/// Turns per-file failures into a command failure once the batch is done
fn fail_on_errors(outcomes: &[PlanOutcome]) -> Result<()> {
    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    if failed > 0 {
        bail!("{failed} of {} plan file(s) failed", outcomes.len());
    }
    Ok(())
}
