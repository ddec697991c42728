//! # Field Format Validation
//!
//! Character-level checks for the optional contact fields on patient
//! forms. Validation runs entirely client-side, before any network call;
//! the server performs its own validation and remains authoritative.

/// Minimum number of characters in a phone number, separators included.
const PHONE_MIN_LEN: usize = 9;

/// Basic address check: exactly one `@`, non-empty local part, and a
/// domain that contains a dot with characters on both sides. No
/// whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain
        .split('.')
        .filter(|segment| !segment.is_empty())
        .count()
        >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Basic phone check: at least [`PHONE_MIN_LEN`] characters, all drawn
/// from digits, spaces, `-`, and `+`.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() >= PHONE_MIN_LEN
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-' || c == '+')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("amadou.diallo@clinic.sn"));
        assert!(is_valid_email("a@b.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@signs.example"));
        assert!(!is_valid_email("@missing-local.example"));
        assert!(!is_valid_email("missing-domain@"));
        assert!(!is_valid_email("no-dot@domain"));
        assert!(!is_valid_email("spaces in@local.example"));
        assert!(!is_valid_email("trailing-dot@domain."));
    }

    #[test]
    fn accepts_local_phone_formats() {
        assert!(is_valid_phone("771234567"));
        assert!(is_valid_phone("+221 77 123 45 67"));
        assert!(is_valid_phone("77-123-45-67"));
    }

    #[test]
    fn rejects_short_or_lettered_phones() {
        assert!(!is_valid_phone("77123"));
        assert!(!is_valid_phone("77123456a"));
        assert!(!is_valid_phone(""));
    }
}
