//! Lead exports.
//!
//! - **CSV**: the short field list, the upload error report, the sample template
//! - **XLSX**: all fields with friendly headers, the upload error report

mod columns;
mod csv_export;
mod error;
mod xlsx;

use lead_model::{Lead, LeadId};

pub use columns::SIMPLE_FIELDS;
pub use csv_export::{write_error_report_csv, write_leads_csv, write_sample_csv};
pub use error::ExportError;
pub use xlsx::{error_report_xlsx, leads_xlsx};

/// Picks the leads with the given ids, in the order of `leads`. Unknown ids are ignored.
pub fn select_leads<'a>(leads: &'a [Lead], ids: &[LeadId]) -> Vec<&'a Lead> {
    leads.iter().filter(|lead| ids.contains(&lead.id)).collect()
}
