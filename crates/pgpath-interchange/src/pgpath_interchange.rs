//! pgpath report artifacts
//!
//! Turns an [`Analysis`](pgpath_analyzer::Analysis) into the files a run
//! leaves behind:
//!
//! ```text
//! Analysis ─┬─► blocks  ──► <stem>_pathcost.txt
//!           └─► reports ──► SheetLayout per alias ──► <stem>_path_cost_info.xlsx
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let analysis = pgpath_analyzer::analyze(&plan, &log)?;
//! let dir = make_unique_dir(Path::new("out/q1"))?;
//! let files = ReportExporter::new(dir).export("q1", &analysis)?;
//! ```

mod exporter;
mod output_dir;
pub mod sheet;
mod xlsx_export;

pub use exporter::{
    ExportError, ExportedFiles, PATH_COST_XLSX_SUFFIX, PATHCOST_TEXT_SUFFIX, ReportExporter,
};
pub use output_dir::make_unique_dir;
pub use sheet::{SheetLayout, SheetNames, SheetOptions, layout_workbook, sanitize_sheet_name};
pub use xlsx_export::{render_workbook, save_workbook, workbook_bytes};
