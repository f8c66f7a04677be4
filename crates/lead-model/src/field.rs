//! Importable lead fields.
//!
//! [`LeadField`] names every column a spreadsheet can feed into a lead record.
//! Store-managed attributes (id, timestamps, owner) are not fields in this sense:
//! they never come from an upload and are never overwritten by one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Maximum stored length of an email column.
pub const EMAIL_MAX_LEN: usize = 254;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    LeadId,
    FullName,
    FirstName,
    LastName,
    JobTitle,
    ProfessionalEmail,
    EmailStatus,
    PersonalEmail,
    PersonLinkedinUrl,
    PersonCity,
    PersonState,
    PersonCountry,
    PersonDirectPhone,
    CompanyId,
    CompanyName,
    CompanyWebsite,
    Industry,
    Employees,
    GenericEmail,
    FullAddress,
    FirstAddress,
    CompanyCity,
    CompanyState,
    ZipCode,
    CompanyCountry,
    CompanyLinkedinUrl,
    CompanyPhone,
    Comments,
    Revenue,
    Status,
    Source,
}

impl LeadField {
    /// All fields in export order.
    pub const ALL: [LeadField; 31] = [
        Self::LeadId,
        Self::FullName,
        Self::FirstName,
        Self::LastName,
        Self::JobTitle,
        Self::ProfessionalEmail,
        Self::EmailStatus,
        Self::PersonalEmail,
        Self::PersonLinkedinUrl,
        Self::PersonCity,
        Self::PersonState,
        Self::PersonCountry,
        Self::PersonDirectPhone,
        Self::CompanyId,
        Self::CompanyName,
        Self::CompanyWebsite,
        Self::Industry,
        Self::Employees,
        Self::GenericEmail,
        Self::FullAddress,
        Self::FirstAddress,
        Self::CompanyCity,
        Self::CompanyState,
        Self::ZipCode,
        Self::CompanyCountry,
        Self::CompanyLinkedinUrl,
        Self::CompanyPhone,
        Self::Comments,
        Self::Revenue,
        Self::Status,
        Self::Source,
    ];

    /// Fields that must be non-blank on every imported row.
    pub const REQUIRED: [LeadField; 4] = [
        Self::FirstName,
        Self::LastName,
        Self::ProfessionalEmail,
        Self::CompanyName,
    ];

    /// Canonical snake-case column name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::LeadId => "lead_id",
            Self::FullName => "full_name",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::JobTitle => "job_title",
            Self::ProfessionalEmail => "professional_email",
            Self::EmailStatus => "email_status",
            Self::PersonalEmail => "personal_email",
            Self::PersonLinkedinUrl => "person_linkedin_url",
            Self::PersonCity => "person_city",
            Self::PersonState => "person_state",
            Self::PersonCountry => "person_country",
            Self::PersonDirectPhone => "person_direct_phone",
            Self::CompanyId => "company_id",
            Self::CompanyName => "company_name",
            Self::CompanyWebsite => "company_website",
            Self::Industry => "industry",
            Self::Employees => "employees",
            Self::GenericEmail => "generic_email",
            Self::FullAddress => "full_address",
            Self::FirstAddress => "first_address",
            Self::CompanyCity => "company_city",
            Self::CompanyState => "company_state",
            Self::ZipCode => "zip_code",
            Self::CompanyCountry => "company_country",
            Self::CompanyLinkedinUrl => "company_linkedin_url",
            Self::CompanyPhone => "company_phone",
            Self::Comments => "comments",
            Self::Revenue => "revenue",
            Self::Status => "status",
            Self::Source => "source",
        }
    }

    /// Human-friendly header used by spreadsheet exports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::LeadId => "Lead ID",
            Self::FullName => "Full Name",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::JobTitle => "Job Title",
            Self::ProfessionalEmail => "Professional Email",
            Self::EmailStatus => "Email Status",
            Self::PersonalEmail => "Personal Email",
            Self::PersonLinkedinUrl => "Person LinkedIn URL",
            Self::PersonCity => "Person City",
            Self::PersonState => "Person State",
            Self::PersonCountry => "Person Country",
            Self::PersonDirectPhone => "Direct Phone",
            Self::CompanyId => "Company ID",
            Self::CompanyName => "Company Name",
            Self::CompanyWebsite => "Company Website",
            Self::Industry => "Industry",
            Self::Employees => "Employees",
            Self::GenericEmail => "Generic Email",
            Self::FullAddress => "Full Address",
            Self::FirstAddress => "Address",
            Self::CompanyCity => "Company City",
            Self::CompanyState => "Company State",
            Self::ZipCode => "Zip Code",
            Self::CompanyCountry => "Company Country",
            Self::CompanyLinkedinUrl => "Company LinkedIn URL",
            Self::CompanyPhone => "Company Phone",
            Self::Comments => "Comments",
            Self::Revenue => "Revenue",
            Self::Status => "Status",
            Self::Source => "Source",
        }
    }

    /// Storage limit in characters, `None` for unbounded text columns.
    #[must_use]
    pub fn max_len(self) -> Option<usize> {
        match self {
            Self::FullAddress | Self::Comments => None,
            Self::ProfessionalEmail | Self::PersonalEmail | Self::GenericEmail => {
                Some(EMAIL_MAX_LEN)
            }
            Self::PersonDirectPhone | Self::CompanyPhone | Self::ZipCode => Some(20),
            Self::Employees | Self::Status => Some(50),
            Self::FullName
            | Self::JobTitle
            | Self::PersonLinkedinUrl
            | Self::CompanyName
            | Self::CompanyWebsite
            | Self::FirstAddress
            | Self::CompanyLinkedinUrl => Some(200),
            Self::LeadId
            | Self::FirstName
            | Self::LastName
            | Self::EmailStatus
            | Self::PersonCity
            | Self::PersonState
            | Self::PersonCountry
            | Self::CompanyId
            | Self::Industry
            | Self::CompanyCity
            | Self::CompanyState
            | Self::CompanyCountry
            | Self::Revenue
            | Self::Source => Some(100),
        }
    }

    #[must_use]
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    #[must_use]
    pub fn is_email(self) -> bool {
        matches!(
            self,
            Self::ProfessionalEmail | Self::PersonalEmail | Self::GenericEmail
        )
    }

    /// Looks up a field by its canonical name (exact match).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LeadField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim()).ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn names_are_unique_and_round_trip() {
        let names: BTreeSet<&str> = LeadField::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), LeadField::ALL.len());
        for field in LeadField::ALL {
            assert_eq!(LeadField::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn required_fields_are_bounded() {
        for field in LeadField::REQUIRED {
            assert!(field.is_required());
            assert!(field.max_len().is_some());
        }
        assert!(!LeadField::Revenue.is_required());
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!("employees".parse::<LeadField>(), Ok(LeadField::Employees));
        assert!(matches!(
            "Employees".parse::<LeadField>(),
            Err(ModelError::UnknownField(_))
        ));
    }
}
