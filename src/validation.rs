//! Field-level validation shared by the create and update schemas.
//!
//! Validators collect every failing field into [ValidationErrors] instead of
//! stopping at the first problem, so that a client can show all the messages
//! for a form at once. Messages are user-facing and written in Portuguese.

use std::{fmt::Display, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use uuid::Uuid;

pub(crate) const REQUIRED: &str = "Campo obrigatório";
pub(crate) const INVALID_ID: &str = "ID inválido";
pub(crate) const INVALID_DATE: &str = "Data inválida (use AAAA-MM-DD)";
pub(crate) const INVALID_COLOR: &str = "Cor deve estar no formato hexadecimal (#RRGGBB)";
pub(crate) const INVALID_DAY: &str = "Dia deve estar entre 1 e 31";

/// The format used for dates in request bodies and responses.
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern should compile")
});

static LAST_FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("card digits pattern should compile"));

/// A single failed check, tagged with the path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// The camelCase name of the field, e.g. `mode` or `content[3]`.
    pub path: String,
    /// A user-facing description of what is wrong.
    pub message: String,
}

/// Every issue found while validating one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    /// Create an empty set of errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue for the field at `path`.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Whether no issue has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded issues, in the order they were found.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    /// Whether any issue was recorded for `path`.
    pub fn has_issue_for(&self, path: &str) -> bool {
        self.0.iter().any(|issue| issue.path == path)
    }

    /// Returns `Ok(value)` if no issue was recorded, otherwise the errors.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self
            .0
            .iter()
            .map(|issue| format!("{}: {}", issue.path, issue.message))
            .collect();

        write!(f, "{}", messages.join("; "))
    }
}

/// Unwrap a required field, recording [REQUIRED] if it is missing.
pub(crate) fn required<T>(
    errors: &mut ValidationErrors,
    path: &str,
    value: Option<T>,
) -> Option<T> {
    if value.is_none() {
        errors.add(path, REQUIRED);
    }

    value
}

/// Trim `value` and check that it has between `min` and `max` characters.
pub(crate) fn text(
    errors: &mut ValidationErrors,
    path: &str,
    value: &str,
    min: usize,
    max: usize,
    message: &str,
) -> Option<String> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();

    if length < min || length > max {
        errors.add(path, message);
        None
    } else {
        Some(trimmed.to_owned())
    }
}

pub(crate) fn uuid(errors: &mut ValidationErrors, path: &str, value: &str) -> Option<Uuid> {
    match Uuid::parse_str(value.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(path, INVALID_ID);
            None
        }
    }
}

pub(crate) fn date(errors: &mut ValidationErrors, path: &str, value: &str) -> Option<Date> {
    match Date::parse(value.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(path, INVALID_DATE);
            None
        }
    }
}

pub(crate) fn hex_color(errors: &mut ValidationErrors, path: &str, value: &str) -> Option<String> {
    let value = value.trim();

    if HEX_COLOR.is_match(value) {
        Some(value.to_owned())
    } else {
        errors.add(path, INVALID_COLOR);
        None
    }
}

pub(crate) fn last_four_digits(
    errors: &mut ValidationErrors,
    path: &str,
    value: &str,
) -> Option<String> {
    let value = value.trim();

    if LAST_FOUR_DIGITS.is_match(value) {
        Some(value.to_owned())
    } else {
        errors.add(path, "Informe os 4 últimos dígitos do cartão");
        None
    }
}

pub(crate) fn positive_amount(
    errors: &mut ValidationErrors,
    path: &str,
    value: f64,
    message: &str,
) -> Option<f64> {
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        errors.add(path, message);
        None
    }
}

/// A day of the month between 1 and 31.
pub(crate) fn day_of_month(errors: &mut ValidationErrors, path: &str, value: i64) -> Option<u8> {
    if (1..=31).contains(&value) {
        Some(value as u8)
    } else {
        errors.add(path, INVALID_DAY);
        None
    }
}

/// Parse one of the accepted spellings of an enumeration.
pub(crate) fn one_of<T: FromStr>(
    errors: &mut ValidationErrors,
    path: &str,
    value: &str,
    message: &str,
) -> Option<T> {
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(path, message);
            None
        }
    }
}
