use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_+&*-]+(?:\.[a-zA-Z0-9_+&*-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,7}$")
        .expect("email pattern is valid")
});

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("username pattern is valid"));

/// Whole-string, case-sensitive match of the email syntax.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Non-empty and ASCII letters/digits only.
pub fn validate_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "a.b+c@sub.domain.com",
            "user@example.org",
            "first_last-1&x*y@mail.example.co",
            "x@a-b.museum",
        ] {
            assert!(validate_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "",
            "not-an-email",
            "a@b",
            "a@b.c",
            "a@b.toolongtld",
            ".a@b.com",
            "a..b@c.com",
            "a@.com",
            "a b@c.com",
            "a@b.com\n",
            "a@b.c0m",
        ] {
            assert!(!validate_email(email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn username_is_nonempty_ascii_alphanumeric() {
        assert!(validate_username("alice"));
        assert!(validate_username("Bob42"));
        assert!(validate_username("7"));

        assert!(!validate_username(""));
        assert!(!validate_username("alice smith"));
        assert!(!validate_username("alice_"));
        assert!(!validate_username("al-ice"));
        assert!(!validate_username("zoë"));
        assert!(!validate_username("alice\n"));
    }

    #[test]
    fn username_rule_matches_char_predicate() {
        for candidate in ["abc", "ABC123", "", "a.b", "x y", "ñ", "0", "a\tb"] {
            let expected =
                !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_alphanumeric());
            assert_eq!(validate_username(candidate), expected, "{candidate:?}");
        }
    }
}
