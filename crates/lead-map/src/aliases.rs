//! Header alias table.
//!
//! Maps the header spellings seen in exported lead lists onto [`LeadField`]s.
//! Lookup tries the exact spelling first, then a case-insensitive match on the
//! trimmed header.

use std::collections::BTreeMap;

use lead_model::{LeadField, ModelError};

/// Header variants accepted for each field, besides the canonical name.
const VARIANTS: &[(LeadField, &[&str])] = &[
    (LeadField::LeadId, &["Lead ID", "LeadID", "Lead Id", "Contact ID", "Person ID"]),
    (LeadField::FullName, &["Full Name", "Name", "Contact Name", "Person Name"]),
    (LeadField::FirstName, &["First Name", "FirstName", "First", "Given Name"]),
    (LeadField::LastName, &["Last Name", "LastName", "Last", "Surname", "Family Name"]),
    (LeadField::JobTitle, &["Job Title", "Title", "Designation", "Position", "Role"]),
    (
        LeadField::ProfessionalEmail,
        &[
            "Email",
            "Work Email",
            "Professional Email",
            "Business Email",
            "Email Address",
            "E-mail",
            "Prof. Email",
        ],
    ),
    (LeadField::EmailStatus, &["Email Status", "Email Verification", "Verification Status"]),
    (LeadField::PersonalEmail, &["Personal Email", "Personal E-mail", "Private Email"]),
    (
        LeadField::PersonLinkedinUrl,
        &["Person Linkedin Url", "LinkedIn", "LinkedIn URL", "Linkedin Profile", "Person LinkedIn"],
    ),
    (LeadField::PersonCity, &["Person City", "City", "Contact City"]),
    (LeadField::PersonState, &["Person State", "State", "Contact State", "Region"]),
    (LeadField::PersonCountry, &["Person Country", "Country", "Contact Country"]),
    (
        LeadField::PersonDirectPhone,
        &["Person Direct Phone", "Direct Phone", "Phone", "Mobile", "Mobile Phone", "Phone Number"],
    ),
    (LeadField::CompanyId, &["Company ID", "CompanyID", "Company Id", "Account ID"]),
    (
        LeadField::CompanyName,
        &["Company", "Company Name", "Organization", "Organisation", "Account Name", "Employer"],
    ),
    (LeadField::CompanyWebsite, &["Company Website", "Website", "Domain", "Company Domain", "URL"]),
    (LeadField::Industry, &["Industry", "Sector", "Vertical"]),
    (
        LeadField::Employees,
        &[
            "Employees",
            "# Employees",
            "Employee Count",
            "Number of Employees",
            "Company Size",
            "Headcount",
            "Size",
        ],
    ),
    (LeadField::GenericEmail, &["Generic Email", "Company Email", "General Email", "Info Email"]),
    (LeadField::FullAddress, &["Full Address", "Company Address", "Address Full"]),
    (LeadField::FirstAddress, &["First Address", "Address", "Address Line 1", "Street"]),
    (LeadField::CompanyCity, &["Company City", "HQ City"]),
    (LeadField::CompanyState, &["Company State", "HQ State"]),
    (LeadField::ZipCode, &["Zip Code", "Zip", "Postal Code", "Postcode", "ZIP"]),
    (LeadField::CompanyCountry, &["Company Country", "HQ Country"]),
    (
        LeadField::CompanyLinkedinUrl,
        &["Company Linkedin Url", "Company LinkedIn", "Company LinkedIn URL"],
    ),
    (
        LeadField::CompanyPhone,
        &["Company Phone", "Company Phone Number", "Office Phone", "HQ Phone"],
    ),
    (LeadField::Comments, &["Comments", "Comment", "Notes", "Note"]),
    (LeadField::Revenue, &["Revenue", "Annual Revenue", "Company Revenue", "Revenue Range"]),
    (LeadField::Status, &["Status", "Lead Status"]),
    (LeadField::Source, &["Source", "Lead Source"]),
];

/// Header spelling to target field lookup.
#[derive(Debug, Clone)]
pub struct AliasTable {
    exact: BTreeMap<String, LeadField>,
    folded: BTreeMap<String, LeadField>,
}

/// How a header was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    CaseInsensitive,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl AliasTable {
    /// Canonical field names plus the built-in header variants.
    pub fn standard() -> Self {
        let mut table = Self {
            exact: BTreeMap::new(),
            folded: BTreeMap::new(),
        };
        for field in LeadField::ALL {
            table.insert(field.name(), field);
        }
        for (field, variants) in VARIANTS {
            for variant in *variants {
                table.insert(variant, *field);
            }
        }
        table
    }

    /// Adds extra `header = field_name` aliases, e.g. from a config file.
    ///
    /// Extra aliases replace built-in entries with the same spelling.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (header, field_name) in overrides {
            let field: LeadField = field_name.parse()?;
            self.exact.insert(header.to_string(), field);
            self.folded.insert(fold(header), field);
        }
        Ok(self)
    }

    fn insert(&mut self, header: &str, field: LeadField) {
        self.exact.entry(header.to_string()).or_insert(field);
        self.folded.entry(fold(header)).or_insert(field);
    }

    /// Resolves a header: exact spelling first, then case-insensitive.
    pub fn lookup(&self, header: &str) -> Option<(LeadField, MatchKind)> {
        if let Some(field) = self.exact.get(header) {
            return Some((*field, MatchKind::Exact));
        }
        self.folded
            .get(&fold(header))
            .map(|field| (*field, MatchKind::CaseInsensitive))
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

fn fold(header: &str) -> String {
    header.trim().to_lowercase()
}
