//! Field rules for books and movies.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Total significant digits allowed in a budget (`NUMERIC(12, 2)`).
pub const BUDGET_MAX_DIGITS: usize = 12;
pub const BUDGET_DECIMAL_PLACES: usize = 2;

/// Validate a title: required, at most [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_required("title", title, MAX_TITLE_LENGTH)
}

/// Validate a book category: required, at most [`MAX_CATEGORY_LENGTH`] characters.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    validate_required("category", category, MAX_CATEGORY_LENGTH)
}

fn validate_required(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

/// A fixed-point money amount with two decimal places.
///
/// Kept in canonical text form (`"1500000.00"`) so it binds straight into a
/// `NUMERIC(12, 2)` column and serializes the way the column reads back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget(String);

impl Budget {
    /// Parse and normalize a decimal string.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::Validation(format!("budget '{raw}' is not a valid number"));

        let s = raw.trim();
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let frac_trimmed = frac_part.trim_end_matches('0');
        if frac_trimmed.len() > BUDGET_DECIMAL_PLACES {
            return Err(CoreError::Validation(format!(
                "budget must have no more than {BUDGET_DECIMAL_PLACES} decimal places"
            )));
        }

        let int_digits = int_part.trim_start_matches('0');
        let max_int_digits = BUDGET_MAX_DIGITS - BUDGET_DECIMAL_PLACES;
        if int_digits.len() > max_int_digits {
            return Err(CoreError::Validation(format!(
                "budget must have no more than {max_int_digits} digits before the decimal point"
            )));
        }

        let int_norm = if int_digits.is_empty() { "0" } else { int_digits };
        let frac_norm = format!("{frac_trimmed:0<width$}", width = BUDGET_DECIMAL_PLACES);
        let is_zero = int_norm == "0" && frac_norm.chars().all(|c| c == '0');
        let sign = if negative && !is_zero { "-" } else { "" };

        Ok(Self(format!("{sign}{int_norm}.{frac_norm}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Budget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Budget {
    /// Accepts either a JSON string (`"1500000.00"`) or a JSON number.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let raw = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };
        Budget::parse(&raw).map_err(serde::de::Error::custom)
    }
}
