//! Field and form specifications.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::normalize::Normalizer;
use crate::rule::{Rule, RuleKind};
use crate::state::FieldStatus;

/// Declaration of a single field: its rules, in evaluation order, and the
/// message reported when each kind of rule fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, unique within a form.
    pub name: String,
    /// Rules, evaluated in order.
    pub rules: Vec<Rule>,
    /// Error messages keyed by rule kind.
    pub messages: HashMap<RuleKind, String>,
    /// Input normalizer applied by controllers.
    pub normalizer: Option<Normalizer>,
}

impl FieldSpec {
    /// Creates a field with no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            messages: HashMap::new(),
            normalizer: None,
        }
    }

    /// Appends a rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the message for a rule kind.
    #[must_use]
    pub fn message(mut self, kind: impl Into<RuleKind>, message: impl Into<String>) -> Self {
        self.messages.insert(kind.into(), message.into());
        self
    }

    /// Appends a rule together with its message.
    #[must_use]
    pub fn rule_with_message(self, rule: Rule, message: impl Into<String>) -> Self {
        let kind = rule.kind();
        self.rule(rule).message(kind, message)
    }

    /// Attaches an input normalizer.
    #[must_use]
    pub fn normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Returns whether the field declares a `required` rule.
    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    /// Returns the message for a rule kind, falling back to a generic one
    /// naming the field.
    pub fn message_for(&self, kind: &RuleKind) -> String {
        self.messages
            .get(kind)
            .cloned()
            .unwrap_or_else(|| format!("Error en {}", self.name))
    }

    /// Evaluates a raw value against the rules.
    ///
    /// Rules see the trimmed value. An empty value on a field without a
    /// `required` rule is valid without consulting any rule. Otherwise the
    /// first failing rule decides the message.
    pub fn evaluate(&self, raw: &str) -> FieldStatus {
        let value = raw.trim();
        if value.is_empty() && !self.is_required() {
            return FieldStatus::Valid;
        }

        match self.rules.iter().find(|rule| !rule.check(value)) {
            Some(rule) => {
                let kind = rule.kind();
                debug!(field = %self.name, rule = %kind, "field failed validation");
                FieldStatus::Invalid(self.message_for(&kind))
            }
            None => FieldStatus::Valid,
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyFieldName);
        }

        for key in self.messages.keys() {
            if !self.rules.iter().any(|rule| &rule.kind() == key) {
                return Err(ConfigError::UnknownMessageKey {
                    field: self.name.clone(),
                    key: key.to_string(),
                });
            }
        }

        for rule in &self.rules {
            if let Rule::Custom { kind, .. } = rule {
                warn!(field = %self.name, rule = %kind, "unrecognized rule kind, it always passes");
            }
        }

        Ok(())
    }
}

/// An ordered, immutable set of field specs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSpec {
    fields: Vec<FieldSpec>,
    index: HashMap<String, usize>,
}

impl FormSpec {
    /// Returns a builder.
    pub fn builder() -> FormSpecBuilder {
        FormSpecBuilder::new()
    }

    /// Builds a spec from field declarations, checking names and message
    /// keys.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            field.check()?;
            if index.insert(field.name.clone(), position).is_some() {
                return Err(ConfigError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { fields, index })
    }

    /// Returns a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.index.get(name).map(|&position| &self.fields[position])
    }

    /// Returns whether a field is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns all fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Returns the fields declaring a `required` rule.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|field| field.is_required())
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the spec has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for [`FormSpec`].
#[derive(Debug, Default)]
pub struct FormSpecBuilder {
    fields: Vec<FieldSpec>,
}

impl FormSpecBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Builds the spec.
    pub fn build(self) -> Result<FormSpec, ConfigError> {
        FormSpec::new(self.fields)
    }
}
