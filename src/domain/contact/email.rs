//! Email address value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A syntactically valid email address.
///
/// Validation follows the `local@domain.tld` shape: no whitespace, exactly
/// one `@`, a non-empty local part, and a domain containing a dot away from
/// either edge.
/// This is a gatekeeping check, not full RFC 5322 parsing; the store's unique
/// constraint is the final arbiter of identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and validates an email address, trimming surrounding whitespace.
    pub fn parse(input: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = input.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "email",
                "must not contain whitespace",
            ));
        }

        let (local, domain) = trimmed
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing '@'"))?;

        if local.is_empty() {
            return Err(ValidationError::invalid_format(
                "email",
                "empty local part",
            ));
        }
        if domain.contains('@') {
            return Err(ValidationError::invalid_format(
                "email",
                "more than one '@'",
            ));
        }
        // The dot must not sit at either edge: "user@domain." and
        // "user@.tld" are out.
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ValidationError::invalid_format(
                "email",
                "domain must contain a dot",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_common_shapes() {
        for input in [
            "user@example.com",
            "first.last@example.co.uk",
            "u+tag@sub.example.org",
        ] {
            assert!(EmailAddress::parse(input).is_ok(), "input = {:?}", input);
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let email = EmailAddress::parse("  user@example.com  ").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn rejects_invalid_shapes() {
        for input in [
            "",
            "not-an-email",
            "@example.com",
            "user@",
            "user@domain",
            "user@.com",
            "user@domain.",
            "user@@example.com",
            "us er@example.com",
        ] {
            assert!(EmailAddress::parse(input).is_err(), "input = {:?}", input);
        }
    }

    proptest! {
        #[test]
        fn strings_without_at_are_rejected(input in "[^@]*") {
            prop_assert!(EmailAddress::parse(input).is_err());
        }

        #[test]
        fn generated_valid_addresses_are_accepted(
            local in "[a-z0-9.+_-]{1,16}",
            domain in "[a-z0-9-]{1,12}",
            tld in "[a-z]{2,6}",
        ) {
            let input = format!("{}@{}.{}", local, domain, tld);
            prop_assert!(EmailAddress::parse(&input).is_ok());
        }
    }
}
