//! Character record validation.
//!
//! [`validate`] turns untrusted form input into a [`ValidCharacter`] or an
//! ordered list of every rule it broke. Rules never short-circuit, so a form
//! can show all problems at once.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Raw character fields exactly as submitted by a form.
///
/// Every field is an untrusted string. Missing fields deserialize as empty
/// strings so a partial submission still reaches the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub photo: String,
}

/// A normalized character payload that satisfies every rule.
///
/// Produced by [`validate`]. The persistence layer accepts this type, never
/// raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidCharacter {
    pub name: String,
    pub color: String,
    pub kind: String,
    pub level: i32,
    /// Empty when the character has no photo.
    pub photo: String,
}

impl ValidCharacter {
    /// The photo URL, if one was given.
    pub fn photo_url(&self) -> Option<&str> {
        (!self.photo.is_empty()).then_some(self.photo.as_str())
    }
}

/// A single broken validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    NameRequired,
    InvalidPhotoUrl,
}

impl ValidationError {
    /// Form field the rule applies to.
    pub fn field(self) -> &'static str {
        match self {
            Self::NameRequired => "name",
            Self::InvalidPhotoUrl => "photo",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameRequired => f.write_str("name is required"),
            Self::InvalidPhotoUrl => f.write_str("photo URL is invalid"),
        }
    }
}

/// Ordered, non-empty list of validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable messages in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

/// Normalize and check raw character input.
///
/// Text fields are trimmed first. `level` is coerced rather than rejected, see
/// [`coerce_level`].
pub fn validate(input: &CharacterInput) -> Result<ValidCharacter, ValidationErrors> {
    let name = input.name.trim();
    let color = input.color.trim();
    let kind = input.kind.trim();
    let photo = input.photo.trim();

    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(ValidationError::NameRequired);
    }
    if !photo.is_empty() && !is_absolute_url(photo) {
        errors.push(ValidationError::InvalidPhotoUrl);
    }

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }

    Ok(ValidCharacter {
        name: name.to_string(),
        color: color.to_string(),
        kind: kind.to_string(),
        level: coerce_level(&input.level),
        photo: photo.to_string(),
    })
}

/// Read the leading integer of `raw`, falling back to 0.
///
/// An optional sign followed by ASCII digits is read and anything after the
/// digits is ignored, so `"12abc"` is 12. No leading digits, or a value that
/// does not fit in `i32`, yields 0.
pub fn coerce_level(raw: &str) -> i32 {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digit_count == 0 {
        return 0;
    }

    let digits = &rest[..digit_count];
    let parsed = if negative {
        format!("-{digits}").parse::<i32>()
    } else {
        digits.parse::<i32>()
    };
    parsed.unwrap_or(0)
}

/// An absolute URL must carry a scheme and a non-empty host.
fn is_absolute_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| url.host_str().is_some_and(|host| !host.is_empty()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn input(name: &str, level: &str, photo: &str) -> CharacterInput {
        CharacterInput {
            name: name.to_string(),
            color: String::new(),
            kind: String::new(),
            level: level.to_string(),
            photo: photo.to_string(),
        }
    }

    #[test]
    fn empty_name_and_bad_photo_yield_two_ordered_errors() {
        let result = validate(&input("", "", "not a url"));

        let errors = result.expect_err("input must be rejected");
        assert_eq!(
            errors.as_slice(),
            &[ValidationError::NameRequired, ValidationError::InvalidPhotoUrl]
        );
        assert_eq!(
            errors.messages(),
            vec!["name is required", "photo URL is invalid"]
        );
    }

    #[test]
    fn whitespace_only_name_is_required() {
        let errors = validate(&input("   \t", "1", "")).unwrap_err();
        assert_eq!(errors.as_slice(), &[ValidationError::NameRequired]);
    }

    #[test]
    fn non_numeric_level_coerces_to_zero() {
        let valid = validate(&input("Walt", "abc", "")).expect("should validate");
        assert_eq!(valid.level, 0);
        assert_eq!(valid.name, "Walt");
        assert_eq!(valid.photo_url(), None);
    }

    #[test]
    fn fields_are_trimmed() {
        let raw = CharacterInput {
            name: "  Jesse  ".to_string(),
            color: " yellow ".to_string(),
            kind: " partner\n".to_string(),
            level: " 42 ".to_string(),
            photo: "  https://x.test/j.png ".to_string(),
        };

        let valid = validate(&raw).unwrap();

        assert_eq!(valid.name, "Jesse");
        assert_eq!(valid.color, "yellow");
        assert_eq!(valid.kind, "partner");
        assert_eq!(valid.level, 42);
        assert_eq!(valid.photo_url(), Some("https://x.test/j.png"));
    }

    #[test]
    fn relative_or_hostless_photo_is_rejected() {
        for photo in ["/img/walt.png", "walt.png", "mailto:walt@x.test", "http://"] {
            assert_matches!(
                validate(&input("Walt", "1", photo)),
                Err(ref e) if e.as_slice() == [ValidationError::InvalidPhotoUrl],
                "{photo} should be rejected"
            );
        }
    }

    #[test]
    fn valid_photo_is_accepted() {
        assert_matches!(validate(&input("Walt", "1", "https://x.test/w.jpg")), Ok(_));
    }

    #[test]
    fn level_coercion_reads_leading_integer() {
        assert_eq!(coerce_level("99"), 99);
        assert_eq!(coerce_level("-7"), -7);
        assert_eq!(coerce_level("+3"), 3);
        assert_eq!(coerce_level("12abc"), 12);
        assert_eq!(coerce_level("4.9"), 4);
        assert_eq!(coerce_level(""), 0);
        assert_eq!(coerce_level("-"), 0);
        assert_eq!(coerce_level("abc12"), 0);
        assert_eq!(coerce_level("99999999999"), 0);
    }

    #[test]
    fn error_field_names_match_form() {
        assert_eq!(ValidationError::NameRequired.field(), "name");
        assert_eq!(ValidationError::InvalidPhotoUrl.field(), "photo");
    }
}
