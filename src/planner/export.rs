//! Spreadsheet export.
//!
//! The workbook is built entirely in memory; saving it is the caller's job.

use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::Result;
use crate::types::{EditorialRow, SiteInfo};

pub const PLAN_SHEET: &str = "Editorial Plan";
pub const INFO_SHEET: &str = "Project Info";

const COLUMN_WIDTHS: [f64; 7] = [45.0, 60.0, 50.0, 60.0, 40.0, 10.0, 14.0];

/// Serializes rows and run metadata to an `.xlsx` payload
pub fn export(rows: &[EditorialRow], site: &SiteInfo) -> Result<Vec<u8>> {
    export_at(rows, site, Local::now().naive_local())
}

/// Same as [`export`] with an explicit generation timestamp
pub fn export_at(
    rows: &[EditorialRow],
    site: &SiteInfo,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        write_plan_sheet(sheet, rows, &header)?;
    }
    {
        let sheet = workbook.add_worksheet();
        write_info_sheet(sheet, rows.len(), site, generated_at, &header)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_plan_sheet(
    sheet: &mut Worksheet,
    rows: &[EditorialRow],
    header: &Format,
) -> std::result::Result<(), XlsxError> {
    sheet.set_name(PLAN_SHEET)?;

    for (col, (name, width)) in EditorialRow::HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *name, header)?;
        sheet.set_column_width(col, width)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        for (col, value) in row.cells().iter().enumerate() {
            sheet.write_string(r, col as u16, *value)?;
        }
    }

    Ok(())
}

fn write_info_sheet(
    sheet: &mut Worksheet,
    total: usize,
    site: &SiteInfo,
    generated_at: NaiveDateTime,
    header: &Format,
) -> std::result::Result<(), XlsxError> {
    sheet.set_name(INFO_SHEET)?;
    sheet.write_string_with_format(0, 0, "Field", header)?;
    sheet.write_string_with_format(0, 1, "Value", header)?;
    sheet.set_column_width(0, 20)?;
    sheet.set_column_width(1, 50)?;

    let generated = generated_at.format("%Y-%m-%d %H:%M").to_string();
    let text_rows = [
        ("Site Name", site.name.as_str()),
        ("Site URL", site.url.as_str()),
        ("Generation Date", generated.as_str()),
    ];
    for (i, (field, value)) in text_rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, *field)?;
        sheet.write_string(r, 1, *value)?;
    }

    sheet.write_string(4, 0, "Total Articles")?;
    sheet.write_number(4, 1, total as f64)?;

    Ok(())
}

/// Download name: `editorial_plan_<site_name>_<YYYYMMDD>.xlsx`.
///
/// Spaces, path separators and characters reserved on common filesystems
/// become `_`, so the name never leaves the output directory.
pub fn file_name(site_name: &str, date: NaiveDate) -> String {
    let stem: String = site_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    format!("editorial_plan_{}_{}.xlsx", stem, date.format("%Y%m%d"))
}
