//! XLSX writers.

use std::borrow::Borrow;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use lead_ingest::ErrorReport;
use lead_model::Lead;

use crate::columns::{ERROR_HEADER, ROW_NUMBER_HEADER, full_headers, full_row};
use crate::error::ExportError;

fn write_row<S: AsRef<str>>(
    sheet: &mut Worksheet,
    row: u32,
    cells: &[S],
    format: Option<&Format>,
) -> Result<(), ExportError> {
    for (col, cell) in cells.iter().enumerate() {
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        match format {
            Some(format) => sheet.write_string_with_format(row, col, cell.as_ref(), format)?,
            None => sheet.write_string(row, col, cell.as_ref())?,
        };
    }
    Ok(())
}

fn row_index(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

/// Every field of the given leads under friendly headers, bold header row.
pub fn leads_xlsx<L: Borrow<Lead>>(leads: &[L]) -> Result<Vec<u8>, ExportError> {
    if leads.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Leads")?;
    write_row(sheet, 0, &full_headers(), Some(&header))?;
    for (index, lead) in leads.iter().enumerate() {
        write_row(sheet, row_index(index), &full_row(lead.borrow()), None)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    let bytes = workbook.save_to_buffer()?;
    debug!(rows = leads.len(), bytes = bytes.len(), "lead workbook built");
    Ok(bytes)
}

/// The failed rows of an upload as a spreadsheet.
pub fn error_report_xlsx(report: &ErrorReport) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Upload Errors")?;

    let mut header = vec![ROW_NUMBER_HEADER.to_string(), ERROR_HEADER.to_string()];
    header.extend(report.headers.iter().cloned());
    write_row(sheet, 0, &header, Some(&header_format))?;

    for (index, failure) in report.failures.iter().enumerate() {
        let row = row_index(index);
        sheet.write_number(row, 0, failure.row_number as f64)?;
        sheet.write_string(row, 1, failure.message.as_str())?;
        for (offset, value) in failure.values.iter().enumerate() {
            let col = u16::try_from(offset + 2).unwrap_or(u16::MAX);
            sheet.write_string(row, col, value.as_str())?;
        }
    }
    Ok(workbook.save_to_buffer()?)
}
