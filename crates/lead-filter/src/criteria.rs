//! Multi-field lead filtering.

use tracing::debug;

use lead_model::{Lead, LeadStatus};

use crate::range::check_multiple_ranges;

/// Validated filter criteria.
///
/// Criteria are ANDed together; inside one criterion any value may match.
/// An empty criterion does not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFilter {
    pub statuses: Vec<LeadStatus>,
    /// Exact, case-insensitive industry names.
    pub industries: Vec<String>,
    pub person_countries: Vec<String>,
    pub company_countries: Vec<String>,
    pub email_statuses: Vec<String>,
    /// Case-insensitive substrings of the company name.
    pub company_names: Vec<String>,
    /// Case-insensitive substrings of the job title.
    pub job_titles: Vec<String>,
    /// Range expressions matched against `employees` by overlap.
    pub employee_ranges: Vec<String>,
    /// Range expressions matched against `revenue` by overlap.
    pub revenue_ranges: Vec<String>,
    /// Free text searched in names, professional email and company name.
    pub search: Option<String>,
}

impl LeadFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&lead.status) {
            return false;
        }
        if !any_equal(&self.industries, &lead.industry)
            || !any_equal(&self.person_countries, &lead.person_country)
            || !any_equal(&self.company_countries, &lead.company_country)
            || !any_equal(&self.email_statuses, &lead.email_status)
        {
            return false;
        }
        if !any_contains(&self.company_names, &lead.company_name)
            || !any_contains(&self.job_titles, &lead.job_title)
        {
            return false;
        }
        if !self.employee_ranges.is_empty()
            && !check_multiple_ranges(&self.employee_ranges, &lead.employees)
        {
            return false;
        }
        if !self.revenue_ranges.is_empty()
            && !check_multiple_ranges(&self.revenue_ranges, &lead.revenue)
        {
            return false;
        }
        match &self.search {
            Some(term) => search_matches(term, lead),
            None => true,
        }
    }

    /// Keeps the leads matching every criterion, preserving input order.
    ///
    /// Range criteria are evaluated in application code against each candidate,
    /// so the cost grows with the number of leads scanned.
    pub fn apply<'a, I>(&self, leads: I) -> Vec<&'a Lead>
    where
        I: IntoIterator<Item = &'a Lead>,
    {
        let mut scanned = 0usize;
        let matched: Vec<&Lead> = leads
            .into_iter()
            .inspect(|_| scanned += 1)
            .filter(|lead| self.matches(lead))
            .collect();
        debug!(scanned, matched = matched.len(), "lead filter applied");
        matched
    }
}

fn any_equal(wanted: &[String], actual: &str) -> bool {
    wanted.is_empty()
        || wanted
            .iter()
            .any(|value| value.trim().eq_ignore_ascii_case(actual.trim()))
}

fn any_contains(needles: &[String], haystack: &str) -> bool {
    if needles.is_empty() {
        return true;
    }
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

fn search_matches(term: &str, lead: &Lead) -> bool {
    let term = term.to_lowercase();
    [
        &lead.first_name,
        &lead.last_name,
        &lead.full_name,
        &lead.professional_email,
        &lead.company_name,
    ]
    .into_iter()
    .any(|value| value.to_lowercase().contains(&term))
}
