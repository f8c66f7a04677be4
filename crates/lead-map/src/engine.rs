//! Per-file column mapping.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use lead_model::LeadField;

use crate::aliases::{AliasTable, MatchKind};

/// A source column that feeds a lead field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnAssignment {
    /// Zero-based position of the column in the file.
    pub index: usize,
    pub header: String,
    pub field: LeadField,
    pub match_kind: MatchKind,
}

/// A column dropped because an earlier column already claimed its field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedColumn {
    pub index: usize,
    pub header: String,
    pub field: LeadField,
    /// Header of the column that keeps the field.
    pub kept_header: String,
}

/// Result of mapping one file's headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    pub assignments: Vec<ColumnAssignment>,
    pub dropped: Vec<DroppedColumn>,
    /// Headers with no matching field; their data is not imported.
    pub unmapped: Vec<String>,
}

impl ColumnMapping {
    /// Original header to target field.
    pub fn to_map(&self) -> BTreeMap<String, LeadField> {
        self.assignments
            .iter()
            .map(|assignment| (assignment.header.clone(), assignment.field))
            .collect()
    }

    pub fn field_for(&self, header: &str) -> Option<LeadField> {
        self.assignments
            .iter()
            .find(|assignment| assignment.header == header)
            .map(|assignment| assignment.field)
    }

    pub fn column_for(&self, field: LeadField) -> Option<&ColumnAssignment> {
        self.assignments
            .iter()
            .find(|assignment| assignment.field == field)
    }

    pub fn mapped_fields(&self) -> BTreeSet<LeadField> {
        self.assignments
            .iter()
            .map(|assignment| assignment.field)
            .collect()
    }

    /// Required fields with no source column.
    pub fn missing_required(&self) -> Vec<LeadField> {
        let mapped = self.mapped_fields();
        LeadField::REQUIRED
            .into_iter()
            .filter(|field| !mapped.contains(field))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Maps spreadsheet headers onto lead fields.
///
/// Headers are resolved through an [`AliasTable`]. When several headers resolve
/// to the same field the first one in file order wins and the rest are dropped,
/// so a file carrying both "Email" and "Work Email" imports only "Email".
#[derive(Debug, Clone, Default)]
pub struct ColumnMapper {
    aliases: AliasTable,
}

impl ColumnMapper {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn map_headers<S: AsRef<str>>(&self, headers: &[S]) -> ColumnMapping {
        let mut mapping = ColumnMapping::default();
        let mut claimed: BTreeMap<LeadField, String> = BTreeMap::new();

        for (index, header) in headers.iter().enumerate() {
            let header = header.as_ref();
            let Some((field, match_kind)) = self.aliases.lookup(header) else {
                debug!(header, "header not mapped");
                mapping.unmapped.push(header.to_string());
                continue;
            };
            if let Some(kept_header) = claimed.get(&field) {
                debug!(header, %field, kept_header = %kept_header, "duplicate header dropped");
                mapping.dropped.push(DroppedColumn {
                    index,
                    header: header.to_string(),
                    field,
                    kept_header: kept_header.clone(),
                });
                continue;
            }
            claimed.insert(field, header.to_string());
            mapping.assignments.push(ColumnAssignment {
                index,
                header: header.to_string(),
                field,
                match_kind,
            });
        }

        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let mapper = ColumnMapper::default();
        let mapping = mapper.map_headers(&["Email", "Work Email"]);
        assert_eq!(
            mapping.to_map(),
            BTreeMap::from([("Email".to_string(), LeadField::ProfessionalEmail)])
        );
        assert_eq!(mapping.dropped.len(), 1);
        assert_eq!(mapping.dropped[0].header, "Work Email");
        assert_eq!(mapping.dropped[0].kept_header, "Email");
    }

    #[test]
    fn unmatched_headers_are_absent() {
        let mapper = ColumnMapper::default();
        let mapping = mapper.map_headers(&["Foo", "first name"]);
        assert_eq!(mapping.field_for("Foo"), None);
        assert_eq!(mapping.field_for("first name"), Some(LeadField::FirstName));
        assert_eq!(mapping.unmapped, vec!["Foo".to_string()]);
    }

    #[test]
    fn positions_are_preserved() {
        let mapper = ColumnMapper::default();
        let mapping = mapper.map_headers(&["Notes", "Company", "email"]);
        let company = mapping.column_for(LeadField::CompanyName).unwrap();
        assert_eq!(company.index, 1);
        let email = mapping.column_for(LeadField::ProfessionalEmail).unwrap();
        assert_eq!(email.index, 2);
        assert_eq!(email.match_kind, MatchKind::CaseInsensitive);
    }

    #[test]
    fn reports_missing_required_fields() {
        let mapper = ColumnMapper::default();
        let mapping = mapper.map_headers(&["Email", "Company"]);
        assert_eq!(
            mapping.missing_required(),
            vec![LeadField::FirstName, LeadField::LastName]
        );
    }
}
