//! Canonical employee-count and revenue range choices.
//!
//! The catalog is plain configuration: callers build one (usually
//! [`RangeCatalog::standard`], optionally overridden from a config file) and pass
//! it explicitly to whatever presents or validates filter choices. Range matching
//! itself accepts any free-typed expression, not just catalog values.

use serde::{Deserialize, Serialize};

/// One selectable range: the matched `value` and its display `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeChoice {
    pub value: String,
    pub label: String,
}

impl RangeChoice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeCatalog {
    #[serde(default = "standard_employee_ranges")]
    pub employees: Vec<RangeChoice>,
    #[serde(default = "standard_revenue_ranges")]
    pub revenue: Vec<RangeChoice>,
}

impl Default for RangeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl RangeCatalog {
    /// The stock company-size and annual-revenue buckets.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            employees: standard_employee_ranges(),
            revenue: standard_revenue_ranges(),
        }
    }

    pub fn employee_label(&self, value: &str) -> Option<&str> {
        find_label(&self.employees, value)
    }

    pub fn revenue_label(&self, value: &str) -> Option<&str> {
        find_label(&self.revenue, value)
    }
}

fn find_label<'a>(choices: &'a [RangeChoice], value: &str) -> Option<&'a str> {
    choices
        .iter()
        .find(|choice| choice.value == value)
        .map(|choice| choice.label.as_str())
}

fn standard_employee_ranges() -> Vec<RangeChoice> {
    [
        ("1-10", "1-10"),
        ("11-50", "11-50"),
        ("51-200", "51-200"),
        ("201-500", "201-500"),
        ("501-1000", "501-1,000"),
        ("1001-5000", "1,001-5,000"),
        ("5001-10000", "5,001-10,000"),
        ("10001+", "10,001+"),
    ]
    .into_iter()
    .map(|(value, label)| RangeChoice::new(value, label))
    .collect()
}

fn standard_revenue_ranges() -> Vec<RangeChoice> {
    [
        "$0-1M",
        "$1M-5M",
        "$5M-10M",
        "$10M-25M",
        "$25M-50M",
        "$50M-100M",
        "$100M-500M",
        "$500M-1B",
        "$1B+",
    ]
    .into_iter()
    .map(|value| RangeChoice::new(value, value))
    .collect()
}
