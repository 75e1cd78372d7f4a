//! Form widgets for rendering HTML inputs.

mod inputs;

pub use inputs::{Select, TextInput, Textarea};

use std::collections::BTreeMap;

use formguard_core::{FieldConfig, WidgetKind};

/// Attributes that can be applied to a widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAttrs {
    /// HTML attributes, rendered in key order.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Appends a class to the `class` attribute.
    pub fn add_class(&mut self, class: &str) {
        let classes = match self.attrs.get("class") {
            Some(current) if !current.is_empty() => format!("{current} {class}"),
            _ => class.to_string(),
        };
        self.set("class", classes);
    }

    /// Renders attributes as a string of ` key="value"` pairs.
    pub fn to_html(&self) -> String {
        self.attrs
            .iter()
            .map(|(k, v)| format!(r#" {k}="{}""#, html_escape(v)))
            .collect()
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

/// Trait for form widgets that render HTML inputs.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    ///
    /// # Arguments
    /// * `name` - The field name (used for the name and id attributes)
    /// * `value` - The current value (if any)
    /// * `attrs` - Additional HTML attributes
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// Picks the widget for a configured field.
pub fn widget_for(config: &FieldConfig) -> Box<dyn Widget> {
    let placeholder = config.placeholder.clone();
    match config.widget {
        WidgetKind::Text => Box::new(TextInput::text().with_placeholder(placeholder)),
        WidgetKind::Email => Box::new(TextInput::email().with_placeholder(placeholder)),
        WidgetKind::Tel => Box::new(TextInput::tel().with_placeholder(placeholder)),
        WidgetKind::Textarea => Box::new(Textarea::new(6).with_placeholder(placeholder)),
        WidgetKind::Select => Box::new(Select::new(
            config
                .choices
                .iter()
                .map(|choice| (choice.value.clone(), choice.label.clone()))
                .collect(),
        )),
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use formguard_core::contact::fields::{MENSAJE, SERVICIO, TELEFONO};
    use formguard_core::contact_config;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_widget_attrs() {
        let attrs = WidgetAttrs::new()
            .with("required", "required")
            .with("class", "valid");
        assert_eq!(attrs.to_html(), r#" class="valid" required="required""#);
    }

    #[test]
    fn test_add_class() {
        let mut attrs = WidgetAttrs::new();
        attrs.add_class("a");
        attrs.add_class("b");
        assert_eq!(attrs.get("class").map(String::as_str), Some("a b"));
    }

    #[test]
    fn test_widget_for_config() {
        let config = contact_config();
        let kind = |name: &str| widget_for(config.field(name).unwrap()).input_type().to_string();
        assert_eq!(kind(TELEFONO), "tel");
        assert_eq!(kind(MENSAJE), "textarea");
        assert_eq!(kind(SERVICIO), "select");
    }
}
