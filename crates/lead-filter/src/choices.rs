//! Selectable filter choices.
//!
//! [`FilterChoices`] is built by the caller from the current data and the range
//! catalog, then handed to [`crate::FilterForm::build`]. Nothing here reads
//! ambient state.

use std::collections::BTreeSet;

use serde::Serialize;

use lead_model::{Lead, LeadStatus, RangeCatalog};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// One selectable input: its blank "any" option followed by concrete options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceSet {
    pub name: &'static str,
    pub any_label: &'static str,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChoices {
    pub catalog: RangeCatalog,
    pub industries: Vec<String>,
    pub person_countries: Vec<String>,
    pub company_countries: Vec<String>,
    pub email_statuses: Vec<String>,
}

impl FilterChoices {
    /// Choices with only the catalog and no data-derived values.
    pub fn new(catalog: RangeCatalog) -> Self {
        Self {
            catalog,
            industries: Vec::new(),
            person_countries: Vec::new(),
            company_countries: Vec::new(),
            email_statuses: Vec::new(),
        }
    }

    /// Collects the distinct non-blank values present in `leads`.
    pub fn from_leads<'a, I>(leads: I, catalog: RangeCatalog) -> Self
    where
        I: IntoIterator<Item = &'a Lead>,
    {
        let mut industries = BTreeSet::new();
        let mut person_countries = BTreeSet::new();
        let mut company_countries = BTreeSet::new();
        let mut email_statuses = BTreeSet::new();
        for lead in leads {
            insert_non_blank(&mut industries, &lead.industry);
            insert_non_blank(&mut person_countries, &lead.person_country);
            insert_non_blank(&mut company_countries, &lead.company_country);
            insert_non_blank(&mut email_statuses, &lead.email_status);
        }
        Self {
            catalog,
            industries: industries.into_iter().collect(),
            person_countries: person_countries.into_iter().collect(),
            company_countries: company_countries.into_iter().collect(),
            email_statuses: email_statuses.into_iter().collect(),
        }
    }

    /// Every selectable input in display order.
    pub fn option_sets(&self) -> Vec<ChoiceSet> {
        vec![
            ChoiceSet {
                name: "status",
                any_label: "All Statuses",
                options: LeadStatus::ALL
                    .iter()
                    .map(|status| plain_option(status.as_str()))
                    .collect(),
            },
            plain_set("industry", "All Industries", &self.industries),
            plain_set("person_country", "All Person Countries", &self.person_countries),
            plain_set(
                "company_country",
                "All Company Countries",
                &self.company_countries,
            ),
            plain_set("email_status", "All Email Statuses", &self.email_statuses),
            ChoiceSet {
                name: "employees",
                any_label: "Any Employees",
                options: self
                    .catalog
                    .employees
                    .iter()
                    .map(|choice| SelectOption {
                        value: choice.value.clone(),
                        label: choice.label.clone(),
                    })
                    .collect(),
            },
            ChoiceSet {
                name: "revenue",
                any_label: "Any Revenue",
                options: self
                    .catalog
                    .revenue
                    .iter()
                    .map(|choice| SelectOption {
                        value: choice.value.clone(),
                        label: choice.label.clone(),
                    })
                    .collect(),
            },
        ]
    }
}

fn insert_non_blank(set: &mut BTreeSet<String>, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        set.insert(trimmed.to_string());
    }
}

fn plain_option(value: &str) -> SelectOption {
    SelectOption {
        value: value.to_string(),
        label: value.to_string(),
    }
}

fn plain_set(name: &'static str, any_label: &'static str, values: &[String]) -> ChoiceSet {
    ChoiceSet {
        name,
        any_label,
        options: values.iter().map(|value| plain_option(value)).collect(),
    }
}
