//! Per-field and per-form validation outcomes.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Validity of a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldStatus {
    /// Not validated since the form was created or reset.
    #[default]
    Unvalidated,
    /// Every rule passed.
    Valid,
    /// A rule failed; carries that rule's message.
    Invalid(String),
}

impl FieldStatus {
    /// Returns the status name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unvalidated => "unvalidated",
            Self::Valid => "valid",
            Self::Invalid(_) => "invalid",
        }
    }

    /// Returns the error message, if invalid.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

/// The current value and validity of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    /// Field name.
    pub field: String,
    /// Raw value as entered, untrimmed.
    pub value: String,
    /// Validity status.
    pub status: FieldStatus,
}

impl FieldState {
    /// Creates an empty, unvalidated state for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: String::new(),
            status: FieldStatus::Unvalidated,
        }
    }

    /// Returns whether the field is valid.
    pub fn is_valid(&self) -> bool {
        self.status == FieldStatus::Valid
    }

    /// Returns whether the field is invalid.
    pub fn is_invalid(&self) -> bool {
        matches!(self.status, FieldStatus::Invalid(_))
    }

    /// Returns the error message, if invalid.
    pub fn message(&self) -> Option<&str> {
        self.status.message()
    }
}

impl Serialize for FieldState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldState", 4)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("status", self.status.as_str())?;
        state.serialize_field("message", &self.status.message())?;
        state.end()
    }
}

/// Outcome of validating a whole form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether every field is valid.
    pub is_valid: bool,
    /// Names of invalid fields, in declaration order.
    pub errors: Vec<String>,
    /// State of every field, in declaration order.
    pub fields: Vec<FieldState>,
}

impl ValidationResult {
    /// Builds a result from per-field states.
    pub fn from_states(fields: Vec<FieldState>) -> Self {
        let errors: Vec<String> = fields
            .iter()
            .filter(|state| state.is_invalid())
            .map(|state| state.field.clone())
            .collect();

        Self {
            is_valid: errors.is_empty(),
            errors,
            fields,
        }
    }

    /// Returns the first invalid field, if any.
    pub fn first_error(&self) -> Option<&FieldState> {
        self.fields.iter().find(|state| state.is_invalid())
    }

    /// Returns the state of a field.
    pub fn get(&self, field: &str) -> Option<&FieldState> {
        self.fields.iter().find(|state| state.field == field)
    }
}
