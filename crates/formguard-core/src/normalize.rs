//! Input normalizers applied by form controllers while the user types.
//!
//! None of these run during validation; the engine always sees the value it
//! is given.

use serde::{Deserialize, Serialize};

/// When a normalizer is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// On every input event.
    Input,
    /// When the field loses focus.
    Blur,
}

/// A value normalizer attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalizer {
    /// [`format_phone`], on input.
    Phone,
    /// [`capitalize_name`], on blur.
    Name,
    /// [`clean_email`], on blur.
    Email,
}

impl Normalizer {
    /// Returns when this normalizer runs.
    pub fn trigger(self) -> Trigger {
        match self {
            Self::Phone => Trigger::Input,
            Self::Name | Self::Email => Trigger::Blur,
        }
    }

    /// Applies the normalizer.
    pub fn apply(self, value: &str) -> String {
        match self {
            Self::Phone => format_phone(value),
            Self::Name => capitalize_name(value),
            Self::Email => clean_email(value),
        }
    }
}

/// Keeps only digits and, once there are at least ten, formats the first
/// ten as `(ddd) ddd-dddd`. Extra digits are appended unformatted.
pub fn format_phone(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 10 {
        return digits;
    }
    format!(
        "({}) {}-{}{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..10],
        &digits[10..]
    )
}

/// Uppercases the first letter of every word.
pub fn capitalize_name(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.chars() {
        if c.is_alphabetic() && !in_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = c.is_alphanumeric();
    }
    out
}

/// Trims and lowercases an email address.
pub fn clean_email(value: &str) -> String {
    value.trim().to_lowercase()
}
