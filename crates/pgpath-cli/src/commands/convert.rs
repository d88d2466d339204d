//! `pgpath convert`: rebuild a spreadsheet from a pathcost text artifact

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use pgpath_analyzer::{build_reports, parse_pathcost_text};
use pgpath_interchange::{PATHCOST_TEXT_SUFFIX, ReportExporter, SheetOptions};

use crate::settings::PgpathSettings;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// A `<name>_pathcost.txt` file
    pub text_file: PathBuf,

    /// Directory for the spreadsheet (defaults to the text file's directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Leave the parameterized path list out of the spreadsheet
    #[arg(long)]
    pub no_parameterized: bool,
}

pub fn run(args: &ConvertArgs, settings: &PgpathSettings) -> Result<()> {
    let output_dir = args.output.clone().unwrap_or_else(|| {
        args.text_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });
    let options = SheetOptions {
        include_parameterized: settings.analysis.include_parameterized && !args.no_parameterized,
    };

    let workbook = convert(&args.text_file, &output_dir, options)?;
    println!("{}", workbook.display());
    Ok(())
}

/// Writes `<name>_path_cost_info.xlsx` for `<name>_pathcost.txt`
pub fn convert(text_file: &Path, output_dir: &Path, options: SheetOptions) -> Result<PathBuf> {
    let text = std::fs::read_to_string(text_file)
        .with_context(|| format!("Failed to read pathcost text {:?}", text_file))?;

    let blocks = parse_pathcost_text(&text);
    if blocks.is_empty() {
        bail!("No alias blocks in {:?}", text_file);
    }
    let reports = build_reports(&blocks);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;
    let path = ReportExporter::new(output_dir)
        .with_options(options)
        .write_workbook(&artifact_stem(text_file), &reports)?;
    Ok(path)
}

/// `q1_pathcost.txt` -> `q1`; other names keep their file stem
pub fn artifact_stem(text_file: &Path) -> String {
    let name = text_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(PATHCOST_TEXT_SUFFIX) {
        Some(stem) => stem.to_string(),
        None => text_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}
