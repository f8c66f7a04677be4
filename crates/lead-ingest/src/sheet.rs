//! Reading uploaded spreadsheets into a header + rows table.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::{NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::UploadError;
use crate::upload::FileKind;

/// Cell spellings that mean "no value".
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// First sheet (or the CSV body) as text cells.
///
/// Every row has exactly `headers.len()` cells; rows with no non-empty cell are
/// dropped at read time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn from_raw(mut raw: Vec<Vec<String>>) -> Self {
        let Some(header_index) = raw.iter().position(|row| !is_blank_row(row)) else {
            return Self::default();
        };
        let body = raw.split_off(header_index + 1);
        let headers: Vec<String> = raw
            .pop()
            .unwrap_or_default()
            .iter()
            .map(|cell| normalize_header(cell))
            .collect();
        let width = headers.len();
        let mut rows = Vec::with_capacity(body.len());
        for row in body {
            let mut cells: Vec<String> = row.iter().map(|cell| normalize_cell(cell)).collect();
            if cells.iter().all(String::is_empty) {
                continue;
            }
            cells.resize(width, String::new());
            rows.push(cells);
        }
        Self { headers, rows }
    }
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| normalize_cell(cell).is_empty())
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_cell(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if MISSING_MARKERS.contains(&trimmed) {
        String::new()
    } else {
        trimmed.to_string()
    }
}

pub fn read_sheet(bytes: &[u8], kind: FileKind) -> Result<SheetTable, UploadError> {
    let table = match kind {
        FileKind::Csv => read_csv(bytes)?,
        FileKind::Excel => read_excel(bytes)?,
    };
    debug!(
        kind = kind.as_str(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "sheet read"
    );
    Ok(table)
}

fn read_csv(bytes: &[u8]) -> Result<SheetTable, UploadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut raw = Vec::new();
    for record in reader.records() {
        let record = record.map_err(UploadError::unreadable)?;
        raw.push(record.iter().map(str::to_string).collect());
    }
    Ok(SheetTable::from_raw(raw))
}

fn read_excel(bytes: &[u8]) -> Result<SheetTable, UploadError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(UploadError::unreadable)?;
    let Some(first) = workbook.sheet_names().first().cloned() else {
        return Ok(SheetTable::default());
    };
    let range = workbook
        .worksheet_range(&first)
        .map_err(UploadError::unreadable)?;
    let raw = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    Ok(SheetTable::from_raw(raw))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => float_to_string(*value),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) if value.is_datetime() => value
            .as_datetime()
            .map(format_datetime)
            .unwrap_or_else(|| float_to_string(value.as_f64())),
        Data::DateTime(value) => float_to_string(value.as_f64()),
        Data::DateTimeIso(value) | Data::DurationIso(value) => value.clone(),
    }
}

/// Date cells read as `YYYY-MM-DD`, with the time appended when it is not midnight.
fn format_datetime(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Whole-number floats print without a fractional part, so a phone or zip code
/// typed as a number in Excel keeps its digits.
fn float_to_string(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_headers_are_normalized() {
        let data = "\u{feff} First  Name ,Email\nAda,ada@example.com\n";
        let table = read_sheet(data.as_bytes(), FileKind::Csv).unwrap();
        assert_eq!(table.headers, vec!["First Name", "Email"]);
        assert_eq!(table.rows, vec![vec!["Ada", "ada@example.com"]]);
    }

    #[test]
    fn blank_rows_are_skipped_and_short_rows_padded() {
        let data = "\n,\nA,B,C\n1\n,,\nNaN,N/A,x\n";
        let table = read_sheet(data.as_bytes(), FileKind::Csv).unwrap();
        assert_eq!(table.headers, vec!["A", "B", "C"]);
        assert_eq!(
            table.rows,
            vec![vec!["1", "", ""], vec!["", "", "x"]]
        );
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let table = read_sheet(b"A,B\n", FileKind::Csv).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers.len(), 2);
    }

    #[test]
    fn floats_keep_integral_digits() {
        assert_eq!(float_to_string(94105.0), "94105");
        assert_eq!(float_to_string(1.5), "1.5");
        assert_eq!(float_to_string(f64::NAN), "");
    }

    #[test]
    fn garbage_excel_is_unreadable() {
        let result = read_sheet(b"not a workbook", FileKind::Excel);
        assert!(matches!(result, Err(UploadError::Unreadable { .. })));
    }

    #[test]
    fn excel_dates_read_as_iso_text() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(format_datetime(date.and_hms_opt(0, 0, 0).unwrap()), "2024-03-15");
        assert_eq!(
            format_datetime(date.and_hms_opt(9, 30, 0).unwrap()),
            "2024-03-15 09:30:00"
        );
    }
}
