//! Turning raw filter input into a [`LeadFilter`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lead_model::LeadStatus;

use crate::choices::FilterChoices;
use crate::criteria::LeadFilter;
use crate::split::{split_list, split_range_list};

/// Raw filter input as submitted: repeatable selections plus free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    pub status: Vec<String>,
    pub industry: Vec<String>,
    pub person_country: Vec<String>,
    pub company_country: Vec<String>,
    pub email_status: Vec<String>,
    /// Comma-separated company names.
    pub company: Option<String>,
    /// Comma-separated job titles.
    pub job_title: Option<String>,
    /// Catalog values or free-typed, comma-separated ranges.
    pub employees: Vec<String>,
    pub revenue: Vec<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterFormError {
    #[error("select a valid {field}: '{value}' is not one of the available choices")]
    InvalidChoice { field: &'static str, value: String },
}

pub struct FilterForm;

impl FilterForm {
    /// Validates `query` against `choices` and builds the filter.
    ///
    /// Enumerated selections must be one of the offered choices (compared
    /// case-insensitively). Range inputs are accepted as typed: catalog entries
    /// are suggestions, not a whitelist.
    pub fn build(
        query: &FilterQuery,
        choices: &FilterChoices,
    ) -> Result<LeadFilter, FilterFormError> {
        let mut statuses = Vec::new();
        for value in non_blank(&query.status) {
            let status = LeadStatus::parse(value).ok_or_else(|| FilterFormError::InvalidChoice {
                field: "status",
                value: value.to_string(),
            })?;
            if !statuses.contains(&status) {
                statuses.push(status);
            }
        }

        Ok(LeadFilter {
            statuses,
            industries: select("industry", &query.industry, &choices.industries)?,
            person_countries: select(
                "person_country",
                &query.person_country,
                &choices.person_countries,
            )?,
            company_countries: select(
                "company_country",
                &query.company_country,
                &choices.company_countries,
            )?,
            email_statuses: select("email_status", &query.email_status, &choices.email_statuses)?,
            company_names: query.company.as_deref().map(split_list).unwrap_or_default(),
            job_titles: query.job_title.as_deref().map(split_list).unwrap_or_default(),
            employee_ranges: ranges(&query.employees),
            revenue_ranges: ranges(&query.revenue),
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_string),
        })
    }
}

fn non_blank(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(|value| value.trim()).filter(|value| !value.is_empty())
}

fn select(
    field: &'static str,
    selected: &[String],
    available: &[String],
) -> Result<Vec<String>, FilterFormError> {
    let mut out: Vec<String> = Vec::new();
    for value in non_blank(selected) {
        let Some(choice) = available
            .iter()
            .find(|choice| choice.eq_ignore_ascii_case(value))
        else {
            return Err(FilterFormError::InvalidChoice {
                field,
                value: value.to_string(),
            });
        };
        if !out.contains(choice) {
            out.push(choice.clone());
        }
    }
    Ok(out)
}

fn ranges(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| split_range_list(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use lead_model::RangeCatalog;

    use super::*;

    fn choices() -> FilterChoices {
        FilterChoices {
            industries: vec!["Finance".to_string(), "Software".to_string()],
            ..FilterChoices::new(RangeCatalog::standard())
        }
    }

    #[test]
    fn builds_filter_from_query() {
        let query = FilterQuery {
            status: vec!["new".to_string(), "".to_string(), "New".to_string()],
            industry: vec!["software".to_string()],
            company: Some("Acme, Globex".to_string()),
            employees: vec!["51-200".to_string(), "1,001-5,000, 10001+".to_string()],
            search: Some("  ".to_string()),
            ..FilterQuery::default()
        };
        let filter = FilterForm::build(&query, &choices()).expect("valid form");
        assert_eq!(filter.statuses, vec![LeadStatus::New]);
        assert_eq!(filter.industries, vec!["Software".to_string()]);
        assert_eq!(filter.company_names, vec!["Acme", "Globex"]);
        assert_eq!(filter.employee_ranges, vec!["51-200", "1,001-5,000", "10001+"]);
        assert_eq!(filter.search, None);
    }

    #[test]
    fn rejects_unknown_enumerated_choice() {
        let query = FilterQuery {
            industry: vec!["Mining".to_string()],
            ..FilterQuery::default()
        };
        assert_eq!(
            FilterForm::build(&query, &choices()),
            Err(FilterFormError::InvalidChoice {
                field: "industry",
                value: "Mining".to_string(),
            })
        );
    }

    #[test]
    fn free_typed_ranges_bypass_catalog() {
        let query = FilterQuery {
            revenue: vec!["$3M-4M".to_string()],
            ..FilterQuery::default()
        };
        let filter = FilterForm::build(&query, &choices()).unwrap();
        assert_eq!(filter.revenue_ranges, vec!["$3M-4M"]);
    }
}
