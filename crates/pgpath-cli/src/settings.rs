//! pgpath settings
//!
//! Settings come from an optional TOML file. Every field has a default, so a
//! missing file, an empty file and a partial file are all valid:
//!
//! ```toml
//! [analysis]
//! plan_extension = "json"
//! log_pattern = "postgresql-*.log"
//! include_parameterized = true
//!
//! [staging]
//! remove_source_logs = true
//!
//! [logging]
//! filter = "info"
//! json = false
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};

/// Settings file looked up in the working directory when none is given
pub const DEFAULT_SETTINGS_FILE: &str = "pgpath.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PgpathSettings {
    pub analysis: AnalysisSettings,
    pub staging: StagingSettings,
    pub logging: LogSettings,
}

impl PgpathSettings {
    /// Loads `path`, or `./pgpath.toml` when present, or the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.exists() {
                    Self::load_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse settings TOML {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Compiles `analysis.log_pattern`
    pub fn log_matcher(&self) -> Result<GlobMatcher> {
        let glob = Glob::new(&self.analysis.log_pattern)
            .with_context(|| format!("Invalid log pattern {:?}", self.analysis.log_pattern))?;
        Ok(glob.compile_matcher())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Extension of plan files, without the dot
    pub plan_extension: String,
    /// Glob matched against planner log file names
    pub log_pattern: String,
    /// Write the parameterized path list to spreadsheets
    pub include_parameterized: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            plan_extension: "json".to_string(),
            log_pattern: "postgresql-*.log".to_string(),
            include_parameterized: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StagingSettings {
    /// Delete the matching logs from the staging directory after a run
    pub remove_source_logs: bool,
}

impl Default for StagingSettings {
    fn default() -> Self {
        Self {
            remove_source_logs: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSettings {
    pub filter: String,
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests;
