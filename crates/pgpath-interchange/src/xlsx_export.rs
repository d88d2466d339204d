//! XLSX rendering of sheet layouts
//!
//! Workbooks carry a fixed creation timestamp so that the same layouts
//! always produce the same bytes.

use std::path::Path;

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook, XlsxError};

use crate::sheet::{Cell, SheetLayout};

/// Renders layouts into a workbook, one worksheet each
pub fn render_workbook(sheets: &[SheetLayout]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new()
        .set_author("pgpath")
        .set_creation_datetime(&created);
    workbook.set_properties(&properties);

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, width) in sheet.column_widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        for (row, cells) in sheet.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Cell::Text(text) if text.is_empty() => {}
                    Cell::Text(text) => {
                        worksheet.write_string(row as u32, col as u16, text)?;
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row as u32, col as u16, *value)?;
                    }
                }
            }
        }
    }

    Ok(workbook)
}

/// Renders layouts straight into an in-memory xlsx file
pub fn workbook_bytes(sheets: &[SheetLayout]) -> Result<Vec<u8>, XlsxError> {
    render_workbook(sheets)?.save_to_buffer()
}

/// Renders layouts and saves the workbook at `path`
pub fn save_workbook(sheets: &[SheetLayout], path: &Path) -> Result<(), XlsxError> {
    render_workbook(sheets)?.save(path)
}

#[cfg(test)]
mod tests;
