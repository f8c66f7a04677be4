//! Free-text size and revenue ranges.
//!
//! Lead attributes such as `employees` and `revenue` are stored as whatever the
//! spreadsheet said: `"150"`, `"100-500"`, `"$1M-5M"`, `"10001+"`. Filtering
//! parses the selected filter value and each stored value into a [`Range`] and
//! keeps the lead when the two intervals overlap.
//!
//! Parsing never fails loudly. A value that cannot be read normalizes to `0`
//! (see [`parse_value`]) and a range that cannot be read is `None`, which never
//! matches anything. A literal `"0"` is therefore indistinguishable from an
//! unreadable value when it stands alone.

use tracing::debug;

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// A closed interval `[min, max]`; `max == None` means unbounded above.
///
/// `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    min: i64,
    max: Option<i64>,
}

impl Range {
    /// Interval between two endpoints given in either order.
    #[must_use]
    pub fn between(a: i64, b: i64) -> Self {
        Self {
            min: a.min(b),
            max: Some(a.max(b)),
        }
    }

    /// Single-point interval `[value, value]`.
    #[must_use]
    pub fn exact(value: i64) -> Self {
        Self {
            min: value,
            max: Some(value),
        }
    }

    /// Open-ended interval `[min, +inf)`.
    #[must_use]
    pub fn at_least(min: i64) -> Self {
        Self { min, max: None }
    }

    #[must_use]
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound, `None` when open-ended.
    #[must_use]
    pub fn max(&self) -> Option<i64> {
        self.max
    }

    #[must_use]
    pub fn is_open_ended(&self) -> bool {
        self.max.is_none()
    }

    /// Closed-interval overlap: `self.min <= other.max && self.max >= other.min`.
    #[must_use]
    pub fn overlaps(&self, other: &Range) -> bool {
        let starts_before_other_ends = other.max.is_none_or(|max| self.min <= max);
        let ends_after_other_starts = self.max.is_none_or(|max| max >= other.min);
        starts_before_other_ends && ends_after_other_starts
    }
}

/// Normalizes a money or headcount figure to an integer magnitude.
///
/// Whitespace, `,` and `$` are ignored; a `K`, `M` or `B` suffix (any case)
/// scales the number; a trailing `+` is dropped. Fractions are truncated.
/// Anything unreadable, including the empty string, yields `0`.
///
/// ```
/// use lead_filter::parse_value;
///
/// assert_eq!(parse_value("$1.5M"), 1_500_000);
/// assert_eq!(parse_value("5,001"), 5_001);
/// assert_eq!(parse_value("n/a"), 0);
/// ```
pub fn parse_value(raw: &str) -> i64 {
    read_value(raw).unwrap_or(0)
}

/// Like [`parse_value`] but `None` when the text is not a number.
fn read_value(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != ',' && *ch != '$')
        .collect::<String>()
        .to_uppercase();
    if cleaned.is_empty() {
        return None;
    }

    for (suffix, scale) in [('B', BILLION), ('M', MILLION), ('K', THOUSAND)] {
        if cleaned.contains(suffix) {
            let digits: String = cleaned
                .chars()
                .filter(|ch| *ch != suffix && *ch != '+')
                .collect();
            return scaled(&digits, scale);
        }
    }

    scaled(cleaned.trim_end_matches('+'), 1.0)
}

fn scaled(digits: &str, scale: f64) -> Option<i64> {
    match digits.parse::<f64>() {
        Ok(number) if number.is_finite() => Some((number * scale).trunc() as i64),
        _ => None,
    }
}

/// True when every endpoint of a range expression reads as a number.
///
/// `"1,001-5,000"` is readable; `"51-200,501-1000"` is not, because its
/// upper side `"200,501-1000"` is not a number.
pub(crate) fn is_readable_range(raw: &str) -> bool {
    let trimmed = raw.trim();
    if let Some(prefix) = trimmed.strip_suffix('+') {
        return read_value(prefix).is_some();
    }
    match trimmed.split_once('-') {
        Some((low, high)) => read_value(low).is_some() && read_value(high).is_some(),
        None => read_value(trimmed).is_some(),
    }
}

/// Parses a range expression such as `"51-200"`, `"$1M-5M"`, `"10001+"` or `"150"`.
///
/// Returns `None` for blank input and for a single value that normalizes to `0`.
/// Endpoints given high-to-low are swapped.
pub fn parse_range(raw: &str) -> Option<Range> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(prefix) = trimmed.strip_suffix('+') {
        return Some(Range::at_least(parse_value(prefix)));
    }

    if let Some((low, high)) = trimmed.split_once('-') {
        return Some(Range::between(parse_value(low), parse_value(high)));
    }

    match parse_value(trimmed) {
        0 => None,
        value => Some(Range::exact(value)),
    }
}

/// Returns true when the filter range and the stored value overlap.
///
/// Either side being blank or unparseable means no match.
pub fn check_range_overlap(filter_range: &str, stored_value: &str) -> bool {
    if filter_range.is_empty() || stored_value.is_empty() {
        return false;
    }
    let Some(filter) = parse_range(filter_range) else {
        debug!(filter_range, "unparseable filter range never matches");
        return false;
    };
    let Some(stored) = parse_range(stored_value) else {
        debug!(stored_value, "unparseable stored range never matches");
        return false;
    };
    filter.overlaps(&stored)
}

/// Returns true when any of `filter_ranges` overlaps `stored_value`.
pub fn check_multiple_ranges<S: AsRef<str>>(filter_ranges: &[S], stored_value: &str) -> bool {
    if filter_ranges.is_empty() || stored_value.is_empty() {
        return false;
    }
    filter_ranges
        .iter()
        .any(|filter| check_range_overlap(filter.as_ref(), stored_value))
}
