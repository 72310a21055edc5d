use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Address shape only: non-blank local part, one '@', dotted domain.
    /// Deliverability is the identity provider's problem.
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Check that a string looks like an e-mail address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+tag@sub.domain.org"));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ana"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana @example.com"));
        assert!(!is_valid_email("ana@exa mple.com"));
        assert!(!is_valid_email("@example.com"));
    }
}
