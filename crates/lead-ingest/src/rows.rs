//! Row extraction and validation.

use lead_map::ColumnMapping;
use lead_model::{LeadDraft, LeadField, LeadStatus, ModelError, is_valid_email};

use crate::error::RowError;

/// Pulls the mapped cells of one row into a draft.
///
/// Only mapped fields appear in the draft, so an update never clears fields the
/// file does not carry.
pub fn extract_draft(row: &[String], mapping: &ColumnMapping) -> LeadDraft {
    mapping
        .assignments
        .iter()
        .map(|assignment| {
            let value = row.get(assignment.index).cloned().unwrap_or_default();
            (assignment.field, value)
        })
        .collect()
}

/// Checks required fields, email syntax, status and length limits.
///
/// Errors are reported in field order; the first failing check wins.
pub fn validate_draft(draft: &LeadDraft) -> Result<(), RowError> {
    for field in LeadField::REQUIRED {
        if draft.get(&field).is_none_or(|value| value.trim().is_empty()) {
            return Err(RowError::MissingField(field));
        }
    }
    for (field, value) in draft {
        if let Some(max) = field.max_len()
            && value.chars().count() > max
        {
            return Err(RowError::TooLong { field: *field, max });
        }
        if field.is_email() && !value.is_empty() && !is_valid_email(value) {
            return Err(RowError::InvalidEmail {
                field: *field,
                value: value.clone(),
            });
        }
        if *field == LeadField::Status
            && !value.trim().is_empty()
            && LeadStatus::parse(value).is_none()
        {
            return Err(ModelError::InvalidStatus(value.clone()).into());
        }
    }
    Ok(())
}
