//! CSV writers.

use std::borrow::Borrow;
use std::io::Write;

use csv::WriterBuilder;
use tracing::debug;

use lead_ingest::ErrorReport;
use lead_model::Lead;

use crate::columns::{ERROR_HEADER, ROW_NUMBER_HEADER, SIMPLE_FIELDS};
use crate::error::ExportError;

/// Writes leads with the short field list, canonical field names as headers.
pub fn write_leads_csv<W: Write, L: Borrow<Lead>>(
    writer: W,
    leads: &[L],
) -> Result<(), ExportError> {
    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(SIMPLE_FIELDS.iter().map(|field| field.name()))?;
    for lead in leads {
        let lead: &Lead = lead.borrow();
        csv.write_record(SIMPLE_FIELDS.iter().map(|field| lead.field(*field)))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    debug!(rows = leads.len(), "lead CSV written");
    Ok(())
}

/// Writes the failed rows of an upload: row number, error, then the original cells.
pub fn write_error_report_csv<W: Write>(
    writer: W,
    report: &ErrorReport,
) -> Result<(), ExportError> {
    let mut csv = WriterBuilder::new().flexible(true).from_writer(writer);
    let mut header = vec![ROW_NUMBER_HEADER.to_string(), ERROR_HEADER.to_string()];
    header.extend(report.headers.iter().cloned());
    csv.write_record(&header)?;
    for failure in &report.failures {
        let mut record = vec![failure.row_number.to_string(), failure.message.clone()];
        record.extend(failure.values.iter().cloned());
        csv.write_record(&record)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

const SAMPLE_HEADERS: [&str; 12] = [
    "first_name",
    "last_name",
    "professional_email",
    "person_direct_phone",
    "company_name",
    "job_title",
    "industry",
    "company_website",
    "person_country",
    "employees",
    "revenue",
    "source",
];

const SAMPLE_ROWS: [[&str; 12]; 2] = [
    [
        "John",
        "Doe",
        "john.doe@example.com",
        "+1234567890",
        "Example Inc",
        "CEO",
        "Technology",
        "https://example.com",
        "United States",
        "51-200",
        "$10M-50M",
        "Website",
    ],
    [
        "Jane",
        "Smith",
        "jane.smith@example.com",
        "+0987654321",
        "Sample Co",
        "CTO",
        "Finance",
        "https://sample.com",
        "United Kingdom",
        "1001-5000",
        "$100M-500M",
        "Referral",
    ],
];

/// Upload template: canonical headers and two example rows.
pub fn write_sample_csv<W: Write>(writer: W) -> Result<(), ExportError> {
    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(SAMPLE_HEADERS)?;
    for row in SAMPLE_ROWS {
        csv.write_record(row)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}
