//! Splitting of comma-separated free-text filter inputs.

use crate::range::is_readable_range;

/// Splits a comma-separated list, trimming entries and dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a comma-separated list of range expressions.
///
/// A comma between a digit and a group of exactly three digits is read as a
/// thousands separator as long as the item it joins still has numeric
/// endpoints, so `"1,001-5,000, 10,001+"` yields `["1,001-5,000", "10,001+"]`
/// while `"51-200,501-1000"` yields `["51-200", "501-1000"]`.
pub fn split_range_list(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut segments = raw.split(',');
    let mut current = segments.next().unwrap_or_default().to_string();
    for segment in segments {
        if continues_digit_group(&current, segment) {
            let joined = format!("{current},{segment}");
            if is_readable_range(&joined) {
                current = joined;
                continue;
            }
        }
        push_part(&mut parts, &current);
        current = segment.to_string();
    }
    push_part(&mut parts, &current);
    parts
}

fn continues_digit_group(before: &str, after: &str) -> bool {
    let ends_with_digit = before.chars().last().is_some_and(|ch| ch.is_ascii_digit());
    let group = after.chars().take_while(char::is_ascii_digit).count();
    ends_with_digit && group == 3
}

fn push_part(parts: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}
