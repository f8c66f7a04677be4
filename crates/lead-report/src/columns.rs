//! Column layouts shared by the exporters.

use chrono::{DateTime, Utc};

use lead_model::{Lead, LeadField};

/// Columns of the plain CSV export.
pub const SIMPLE_FIELDS: [LeadField; 12] = [
    LeadField::FirstName,
    LeadField::LastName,
    LeadField::ProfessionalEmail,
    LeadField::PersonDirectPhone,
    LeadField::CompanyName,
    LeadField::JobTitle,
    LeadField::Industry,
    LeadField::CompanyWebsite,
    LeadField::PersonCountry,
    LeadField::Employees,
    LeadField::Status,
    LeadField::Source,
];

pub(crate) const ROW_NUMBER_HEADER: &str = "Row Number";
pub(crate) const ERROR_HEADER: &str = "Error";

pub(crate) fn timestamp(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Friendly headers for the full spreadsheet export.
pub(crate) fn full_headers() -> Vec<&'static str> {
    let mut headers = vec!["ID"];
    headers.extend(LeadField::ALL.iter().map(|field| field.label()));
    headers.extend(["Created By", "Created At", "Updated At"]);
    headers
}

pub(crate) fn full_row(lead: &Lead) -> Vec<String> {
    let mut row = vec![lead.id.to_string()];
    row.extend(LeadField::ALL.iter().map(|field| lead.field(*field).to_string()));
    row.push(lead.created_by.clone());
    row.push(timestamp(lead.created_at));
    row.push(timestamp(lead.updated_at));
    row
}
