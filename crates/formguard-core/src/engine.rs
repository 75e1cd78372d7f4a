//! The validation engine.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{FormError, Result};
use crate::schema::FormSpec;
use crate::state::{FieldState, ValidationResult};

/// Evaluates field values against a [`FormSpec`].
///
/// The engine is a pure function of its spec and the values it is given:
/// it keeps no state between calls and can be shared across threads.
/// Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    spec: Arc<FormSpec>,
}

impl ValidationEngine {
    /// Creates an engine for a spec.
    pub fn new(spec: FormSpec) -> Self {
        Self {
            spec: Arc::new(spec),
        }
    }

    /// Returns the spec.
    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    /// Validates a single field.
    ///
    /// Fails with [`FormError::UnknownField`] when the field is not
    /// declared.
    pub fn validate_field(&self, field: &str, raw: &str) -> Result<FieldState> {
        let spec = self
            .spec
            .field(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;

        Ok(FieldState {
            field: spec.name.clone(),
            value: raw.to_string(),
            status: spec.evaluate(raw),
        })
    }

    /// Validates every declared field. Missing values count as empty.
    pub fn validate_form(&self, values: &HashMap<String, String>) -> ValidationResult {
        let states = self
            .spec
            .fields()
            .iter()
            .map(|spec| {
                let raw = values.get(&spec.name).map_or("", String::as_str);
                FieldState {
                    field: spec.name.clone(),
                    value: raw.to_string(),
                    status: spec.evaluate(raw),
                }
            })
            .collect();

        ValidationResult::from_states(states)
    }
}

impl From<FormSpec> for ValidationEngine {
    fn from(spec: FormSpec) -> Self {
        Self::new(spec)
    }
}
