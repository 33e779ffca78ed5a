//! Field validation

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::money;

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: String,

    /// Description of the violated rule.
    pub message: String,
}

impl ValidationError {
    /// Create a new violation for the given field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Requalify the field name with a parent path, e.g. `items[2].quantity`.
    #[must_use]
    pub fn nested(mut self, parent: impl fmt::Display) -> Self {
        self.field = format!("{parent}.{}", self.field);
        self
    }
}

/// Every rule violation found while validating a record.
///
/// Record construction checks all fields before failing, so a single failed
/// build reports every broken field at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn summarize(errors: &[ValidationError]) -> String {
    let parts: Vec<String> = errors.iter().map(ValidationError::to_string).collect();

    parts.join("; ")
}

impl ValidationErrors {
    /// Create an empty set of violations.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// True when no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Record a violation.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Absorb every violation from another set.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Requalify every violation with a parent path.
    #[must_use]
    pub fn nested(self, parent: impl fmt::Display) -> Self {
        let prefix = parent.to_string();

        Self(self.0.into_iter().map(|e| e.nested(&prefix)).collect())
    }

    /// `Ok` when empty, otherwise the violations themselves.
    ///
    /// # Errors
    ///
    /// Returns `self` if any violation was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Trim a personal name, require it to be non-empty, and title-case it.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the trimmed value is empty.
pub fn person_name(field: &str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be blank"));
    }

    Ok(title_case(trimmed))
}

/// Uppercase the first letter of each word, lowercasing the rest.
///
/// A word starts after any non-alphabetic character, so hyphenated and
/// quoted names capitalize each segment.
#[must_use]
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut boundary = true;

    for ch in value.chars() {
        if ch.is_alphabetic() {
            if boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(ch);
            boundary = true;
        }
    }

    out
}

/// Light shape check for an email address: a single `@` with non-empty
/// local and domain parts, and no whitespace.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the trimmed value does not match that
/// shape.
pub fn email_address(field: &str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();

    let shape_ok = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        });

    if shape_ok && !trimmed.chars().any(char::is_whitespace) {
        Ok(trimmed.to_owned())
    } else {
        Err(ValidationError::new(field, "must be a valid email address"))
    }
}

/// Formatting characters accepted in a phone number besides digits.
const PHONE_PUNCTUATION: [char; 5] = ['+', '-', '(', ')', ' '];

/// Loose phone format check: digits plus common formatting characters.
///
/// A value containing only formatting characters carries no digits and is
/// rejected.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the value contains a character outside
/// the accepted set, or no digit at all.
pub fn phone_number(field: &str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let mut has_digit = false;

    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            has_digit = true;
        } else if !PHONE_PUNCTUATION.contains(&ch) {
            return Err(ValidationError::new(
                field,
                format!("may only contain digits, spaces, and + - ( ) (got {ch:?})"),
            ));
        }
    }

    if !has_digit {
        return Err(ValidationError::new(field, "must contain at least one digit"));
    }

    Ok(trimmed.to_owned())
}

/// Check that a value lies within a closed interval.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the value is below `min` or above `max`.
pub fn within_range<T>(field: &str, value: T, min: T, max: T) -> Result<T, ValidationError>
where
    T: PartialOrd + Copy + fmt::Display,
{
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {min} and {max} (got {value})"),
        ));
    }

    Ok(value)
}

/// Require a strictly positive monetary amount, stored rounded to cents.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the amount is zero or negative.
pub fn positive_price(field: &str, value: Decimal) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::new(field, "must be greater than zero"));
    }

    Ok(money::to_cents(value))
}

/// Require a strictly positive count.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the count is zero or negative.
pub fn positive_count(field: &str, value: i64) -> Result<i64, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new(field, "must be greater than zero"));
    }

    Ok(value)
}

/// Require a count of zero or more.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the count is negative.
pub fn non_negative_count(field: &str, value: i64) -> Result<i64, ValidationError> {
    if value < 0 {
        return Err(ValidationError::new(field, "must not be negative"));
    }

    Ok(value)
}
