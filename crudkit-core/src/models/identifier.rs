//! SQL identifier validation
//!
//! Table and column names are spliced into statements, so every one of them
//! goes through [`Identifier::new`] first and is emitted double-quoted.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for table and column names
const MAX_IDENTIFIER_LEN: usize = 64;

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid identifier regex")
});

/// Validated table or column name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validate `s` as an identifier.
    ///
    /// `field` names what is being validated ("table", "column", ...) and
    /// only shows up in the error.
    ///
    /// # Example
    /// ```
    /// use crudkit_core::Identifier;
    ///
    /// assert!(Identifier::new("column", "sportId").is_ok());
    /// assert!(Identifier::new("column", "sport id").is_err());
    /// assert!(Identifier::new("column", "1st").is_err());
    /// ```
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        if s.len() > MAX_IDENTIFIER_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_IDENTIFIER_LEN,
            });
        }

        if !IDENTIFIER_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field,
                value: s.to_owned(),
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form for use inside SQL text.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_camel_and_snake_case() {
        assert!(Identifier::new("column", "sportId").is_ok());
        assert!(Identifier::new("column", "created_at").is_ok());
        assert!(Identifier::new("column", "_private").is_ok());
    }

    #[test]
    fn rejects_injection_attempts() {
        for bad in ["sport; DROP TABLE sport", "a\"b", "name--", "x y", "1abc"] {
            assert!(
                matches!(
                    Identifier::new("table", bad),
                    Err(ValidationError::InvalidFormat { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_empty_and_long() {
        assert_eq!(
            Identifier::new("table", ""),
            Err(ValidationError::Empty { field: "table" })
        );
        let long = "a".repeat(MAX_IDENTIFIER_LEN + 1);
        assert!(matches!(
            Identifier::new("table", &long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn quoted_form() {
        let id = Identifier::new("column", "sportId").unwrap();
        assert_eq!(id.quoted(), "\"sportId\"");
    }
}
