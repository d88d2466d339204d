//! Report artifacts
//!
//! Writes the two artifacts of an analysis next to each other:
//! `<stem>_pathcost.txt` with the captured log lines and
//! `<stem>_path_cost_info.xlsx` with one sheet per alias.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use pgpath_analyzer::{AliasReport, Analysis, LogBlock, format_pathcost_text};
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

use crate::sheet::{SheetOptions, layout_workbook};
use crate::xlsx_export::save_workbook;

/// File name suffix of the text artifact
pub const PATHCOST_TEXT_SUFFIX: &str = "_pathcost.txt";

/// File name suffix of the spreadsheet artifact
pub const PATH_COST_XLSX_SUFFIX: &str = "_path_cost_info.xlsx";

/// Errors while writing artifacts
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("No aliases to write")]
    NoSheets,
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Paths of the artifacts written for one plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub text: PathBuf,
    pub workbook: PathBuf,
}

/// Writes report artifacts into one directory
pub struct ReportExporter {
    output_dir: PathBuf,
    options: SheetOptions,
}

impl ReportExporter {
    /// Create a new exporter writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            options: SheetOptions::default(),
        }
    }

    /// Set sheet options
    pub fn with_options(mut self, options: SheetOptions) -> Self {
        self.options = options;
        self
    }

    /// Path of the text artifact for `stem`
    pub fn text_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}{PATHCOST_TEXT_SUFFIX}"))
    }

    /// Path of the spreadsheet artifact for `stem`
    pub fn workbook_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}{PATH_COST_XLSX_SUFFIX}"))
    }

    /// Writes both artifacts of an analysis
    pub fn export(&self, stem: &str, analysis: &Analysis) -> Result<ExportedFiles> {
        let text = self.write_text(stem, &analysis.blocks)?;
        let workbook = self.write_workbook(stem, &analysis.reports)?;
        Ok(ExportedFiles { text, workbook })
    }

    /// Writes the text artifact
    pub fn write_text(&self, stem: &str, blocks: &BTreeMap<String, LogBlock>) -> Result<PathBuf> {
        let path = self.text_path(stem);

        let file = std::fs::File::create(&path)?;
        let mut writer = std::io::BufWriter::new(file);
        writer.write_all(format_pathcost_text(blocks).as_bytes())?;
        writer.flush()?;

        tracing::info!(path = %path.display(), aliases = blocks.len(), "wrote pathcost text");
        Ok(path)
    }

    /// Writes the spreadsheet artifact
    pub fn write_workbook(
        &self,
        stem: &str,
        reports: &BTreeMap<String, AliasReport>,
    ) -> Result<PathBuf> {
        if reports.is_empty() {
            return Err(ExportError::NoSheets);
        }

        let path = self.workbook_path(stem);

        let sheets = layout_workbook(reports, self.options);
        save_workbook(&sheets, &path)?;

        tracing::info!(path = %path.display(), sheets = sheets.len(), "wrote path cost workbook");
        Ok(path)
    }
}

#[cfg(test)]
mod tests;
