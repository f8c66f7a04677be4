//! Email checks shared by ingestion and lookup.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern is valid")
});

/// Returns true if `value` looks like `local@domain.tld`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Key used for uniqueness: emails compare case-insensitively.
pub fn email_key(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("jane.doe@example.com"));
        assert!(is_valid_email("ops+leads@sub.example.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("jane.doe"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
        assert!(!is_valid_email("jane@example."));
    }

    #[test]
    fn key_ignores_case_and_padding() {
        assert_eq!(email_key("  Jane@Example.COM "), "jane@example.com");
    }
}
