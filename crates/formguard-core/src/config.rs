//! JSON form configuration.
//!
//! A configuration lists the fields of a form in order. Rules are written in
//! their text form and messages are keyed by rule kind:
//!
//! ```json
//! {
//!   "fields": [
//!     {
//!       "name": "nombre",
//!       "label": "Nombre",
//!       "rules": ["required", "minLength:2"],
//!       "messages": { "required": "El nombre es obligatorio" }
//!     }
//!   ]
//! }
//! ```
//!
//! Presentation hints (`label`, `widget`, `placeholder`, `choices`) are
//! carried for renderers and ignored by the engine.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::normalize::Normalizer;
use crate::rule::Rule;
use crate::schema::{FieldSpec, FormSpec};

/// Input widget hint for renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// Single-line text.
    #[default]
    Text,
    /// Email input.
    Email,
    /// Telephone input.
    Tel,
    /// Multi-line text.
    Textarea,
    /// Dropdown.
    Select,
}

/// A dropdown option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Submitted value.
    pub value: String,
    /// Displayed label.
    pub label: String,
}

/// Configuration of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Field name.
    pub name: String,
    /// Rules in text form, in evaluation order.
    #[serde(default)]
    pub rules: Vec<String>,
    /// Messages keyed by rule kind.
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
    /// Input normalizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalize: Option<Normalizer>,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Widget hint.
    #[serde(default)]
    pub widget: WidgetKind,
    /// Placeholder text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Options for `select` widgets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

impl FieldConfig {
    /// Returns the label, or the field name when none is set.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Parses the rules and messages into a [`FieldSpec`].
    pub fn to_spec(&self) -> Result<FieldSpec, ConfigError> {
        let mut spec = FieldSpec::new(self.name.clone());
        for text in &self.rules {
            spec = spec.rule(Rule::parse(&self.name, text)?);
        }
        for (key, message) in &self.messages {
            spec = spec.message(key.as_str(), message.clone());
        }
        spec.normalizer = self.normalize;
        Ok(spec)
    }
}

/// Configuration of a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Fields in declaration order.
    pub fields: Vec<FieldConfig>,
}

impl FormConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Returns a field's configuration.
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Builds the form spec.
    pub fn build(&self) -> Result<FormSpec, ConfigError> {
        let fields = self
            .fields
            .iter()
            .map(FieldConfig::to_spec)
            .collect::<Result<Vec<_>, _>>()?;
        FormSpec::new(fields)
    }
}

impl TryFrom<&FormConfig> for FormSpec {
    type Error = ConfigError;

    fn try_from(config: &FormConfig) -> Result<Self, Self::Error> {
        config.build()
    }
}

impl TryFrom<FormConfig> for FormSpec {
    type Error = ConfigError;

    fn try_from(config: FormConfig) -> Result<Self, Self::Error> {
        config.build()
    }
}

impl FormSpec {
    /// Parses a JSON configuration and builds the spec.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        FormConfig::from_json(json)?.build()
    }
}
