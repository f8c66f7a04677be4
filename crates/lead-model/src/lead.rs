//! The lead record.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::field::LeadField;
use crate::status::LeadStatus;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LeadId(u64);

impl LeadId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field values extracted from one spreadsheet row, keyed by target field.
///
/// Only fields present in the source file appear; a blank value is an explicit
/// empty string.
pub type LeadDraft = BTreeMap<LeadField, String>;

/// One contact/company pairing.
///
/// Text attributes use the empty string for "no value".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    #[serde(default)]
    pub lead_id: String,
    #[serde(default)]
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub job_title: String,
    pub professional_email: String,
    #[serde(default)]
    pub email_status: String,
    #[serde(default)]
    pub personal_email: String,
    #[serde(default)]
    pub person_linkedin_url: String,
    #[serde(default)]
    pub person_city: String,
    #[serde(default)]
    pub person_state: String,
    #[serde(default)]
    pub person_country: String,
    #[serde(default)]
    pub person_direct_phone: String,
    #[serde(default)]
    pub company_id: String,
    pub company_name: String,
    #[serde(default)]
    pub company_website: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub employees: String,
    #[serde(default)]
    pub generic_email: String,
    #[serde(default)]
    pub full_address: String,
    #[serde(default)]
    pub first_address: String,
    #[serde(default)]
    pub company_city: String,
    #[serde(default)]
    pub company_state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub company_country: String,
    #[serde(default)]
    pub company_linkedin_url: String,
    #[serde(default)]
    pub company_phone: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub revenue: String,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
}

impl Lead {
    /// Creates an empty lead owned by `created_by`.
    pub fn new(id: LeadId, created_by: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            lead_id: String::new(),
            full_name: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            job_title: String::new(),
            professional_email: String::new(),
            email_status: String::new(),
            personal_email: String::new(),
            person_linkedin_url: String::new(),
            person_city: String::new(),
            person_state: String::new(),
            person_country: String::new(),
            person_direct_phone: String::new(),
            company_id: String::new(),
            company_name: String::new(),
            company_website: String::new(),
            industry: String::new(),
            employees: String::new(),
            generic_email: String::new(),
            full_address: String::new(),
            first_address: String::new(),
            company_city: String::new(),
            company_state: String::new(),
            zip_code: String::new(),
            company_country: String::new(),
            company_linkedin_url: String::new(),
            company_phone: String::new(),
            comments: String::new(),
            revenue: String::new(),
            status: LeadStatus::New,
            source: String::new(),
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
        }
    }

    /// Builds a lead from an ingested draft.
    pub fn from_draft(
        id: LeadId,
        draft: &LeadDraft,
        created_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let mut lead = Self::new(id, created_by, now);
        lead.apply_draft(draft, now)?;
        Ok(lead)
    }

    /// Overwrites the fields present in `draft`, leaving the others untouched.
    ///
    /// `created_by` and `created_at` are never changed; `updated_at` becomes `now`.
    pub fn apply_draft(&mut self, draft: &LeadDraft, now: DateTime<Utc>) -> Result<()> {
        for (field, value) in draft {
            self.set_field(*field, value)?;
        }
        self.derive_full_name();
        self.updated_at = now;
        Ok(())
    }

    pub fn field(&self, field: LeadField) -> &str {
        match field {
            LeadField::LeadId => &self.lead_id,
            LeadField::FullName => &self.full_name,
            LeadField::FirstName => &self.first_name,
            LeadField::LastName => &self.last_name,
            LeadField::JobTitle => &self.job_title,
            LeadField::ProfessionalEmail => &self.professional_email,
            LeadField::EmailStatus => &self.email_status,
            LeadField::PersonalEmail => &self.personal_email,
            LeadField::PersonLinkedinUrl => &self.person_linkedin_url,
            LeadField::PersonCity => &self.person_city,
            LeadField::PersonState => &self.person_state,
            LeadField::PersonCountry => &self.person_country,
            LeadField::PersonDirectPhone => &self.person_direct_phone,
            LeadField::CompanyId => &self.company_id,
            LeadField::CompanyName => &self.company_name,
            LeadField::CompanyWebsite => &self.company_website,
            LeadField::Industry => &self.industry,
            LeadField::Employees => &self.employees,
            LeadField::GenericEmail => &self.generic_email,
            LeadField::FullAddress => &self.full_address,
            LeadField::FirstAddress => &self.first_address,
            LeadField::CompanyCity => &self.company_city,
            LeadField::CompanyState => &self.company_state,
            LeadField::ZipCode => &self.zip_code,
            LeadField::CompanyCountry => &self.company_country,
            LeadField::CompanyLinkedinUrl => &self.company_linkedin_url,
            LeadField::CompanyPhone => &self.company_phone,
            LeadField::Comments => &self.comments,
            LeadField::Revenue => &self.revenue,
            LeadField::Status => self.status.as_str(),
            LeadField::Source => &self.source,
        }
    }

    /// Sets one field. A blank status resets to [`LeadStatus::New`].
    pub fn set_field(&mut self, field: LeadField, value: &str) -> Result<()> {
        let slot = match field {
            LeadField::Status => {
                self.status = if value.trim().is_empty() {
                    LeadStatus::New
                } else {
                    value.parse::<LeadStatus>()?
                };
                return Ok(());
            }
            LeadField::LeadId => &mut self.lead_id,
            LeadField::FullName => &mut self.full_name,
            LeadField::FirstName => &mut self.first_name,
            LeadField::LastName => &mut self.last_name,
            LeadField::JobTitle => &mut self.job_title,
            LeadField::ProfessionalEmail => &mut self.professional_email,
            LeadField::EmailStatus => &mut self.email_status,
            LeadField::PersonalEmail => &mut self.personal_email,
            LeadField::PersonLinkedinUrl => &mut self.person_linkedin_url,
            LeadField::PersonCity => &mut self.person_city,
            LeadField::PersonState => &mut self.person_state,
            LeadField::PersonCountry => &mut self.person_country,
            LeadField::PersonDirectPhone => &mut self.person_direct_phone,
            LeadField::CompanyId => &mut self.company_id,
            LeadField::CompanyName => &mut self.company_name,
            LeadField::CompanyWebsite => &mut self.company_website,
            LeadField::Industry => &mut self.industry,
            LeadField::Employees => &mut self.employees,
            LeadField::GenericEmail => &mut self.generic_email,
            LeadField::FullAddress => &mut self.full_address,
            LeadField::FirstAddress => &mut self.first_address,
            LeadField::CompanyCity => &mut self.company_city,
            LeadField::CompanyState => &mut self.company_state,
            LeadField::ZipCode => &mut self.zip_code,
            LeadField::CompanyCountry => &mut self.company_country,
            LeadField::CompanyLinkedinUrl => &mut self.company_linkedin_url,
            LeadField::CompanyPhone => &mut self.company_phone,
            LeadField::Comments => &mut self.comments,
            LeadField::Revenue => &mut self.revenue,
            LeadField::Source => &mut self.source,
        };
        *slot = value.to_string();
        Ok(())
    }

    fn derive_full_name(&mut self) {
        if self.full_name.trim().is_empty()
            && !self.first_name.is_empty()
            && !self.last_name.is_empty()
        {
            self.full_name = format!("{} {}", self.first_name, self.last_name);
        }
    }

    /// Name shown in listings: full name, else first + last.
    pub fn display_name(&self) -> String {
        if self.full_name.is_empty() {
            format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string()
        } else {
            self.full_name.clone()
        }
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {}",
            self.first_name, self.last_name, self.company_name
        )
    }
}
