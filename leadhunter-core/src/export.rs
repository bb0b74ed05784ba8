//! CSV and Excel exports of lead records.
//!
//! The CSV carries website URLs only; the workbook carries names and phone
//! numbers. Missing or empty values are written as [`NOT_AVAILABLE`].

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::lead::LeadRecord;

/// Placeholder written for missing websites and phone numbers.
pub const NOT_AVAILABLE: &str = "Not available";

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const CSV_FILENAME: &str = "business_leads.csv";
pub const CSV_HEADER: &str = "Website URL";

pub const EXCEL_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXCEL_FILENAME: &str = "business_leads.xlsx";
pub const EXCEL_SHEET_NAME: &str = "Business Leads";
pub const EXCEL_HEADERS: [&str; 2] = ["Business Name", "Phone Number"];

/// Errors produced while rendering an export file.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {reason}")]
    Buffer { reason: String },

    #[error("Excel export failed: {0}")]
    Excel(#[from] XlsxError),

    #[error("Too many rows for a worksheet: {rows}")]
    TooManyRows { rows: usize },
}

fn or_not_available(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

/// Renders a single-column CSV of website URLs.
///
/// # Errors
///
/// - `ExportError::Csv` - If a record could not be written
/// - `ExportError::Buffer` - If the writer could not be flushed
pub fn leads_to_csv(records: &[LeadRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([CSV_HEADER])?;

    for record in records {
        writer.write_record([or_not_available(record.website.as_deref())])?;
    }

    writer.into_inner().map_err(|e| ExportError::Buffer {
        reason: e.to_string(),
    })
}

/// Renders an xlsx workbook with business names and phone numbers.
///
/// # Errors
///
/// - `ExportError::Excel` - If the workbook could not be built
/// - `ExportError::TooManyRows` - If the records exceed the worksheet row limit
pub fn leads_to_excel(records: &[LeadRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXCEL_SHEET_NAME)?;

    for (col, header) in (0u16..).zip(EXCEL_HEADERS) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = u32::try_from(index + 1).map_err(|_| ExportError::TooManyRows {
            rows: records.len(),
        })?;
        worksheet.write_string(row, 0, &record.name)?;
        worksheet.write_string(row, 1, or_not_available(record.phone.as_deref()))?;
    }

    worksheet.set_column_width(0, 40)?;
    worksheet.set_column_width(1, 20)?;

    Ok(workbook.save_to_buffer()?)
}
