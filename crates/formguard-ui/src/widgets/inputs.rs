//! Text, textarea and select widgets.

use super::{html_escape, Widget, WidgetAttrs};

fn placeholder_attr(placeholder: Option<&String>) -> String {
    placeholder
        .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
        .unwrap_or_default()
}

/// Single-line input widget.
#[derive(Debug, Clone)]
pub struct TextInput {
    /// The HTML input type (text, email, tel).
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for TextInput {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            placeholder: None,
        }
    }
}

impl TextInput {
    /// Creates a text input.
    pub fn text() -> Self {
        Self::default()
    }

    /// Creates an email input.
    pub fn email() -> Self {
        Self {
            input_type: "email".to_string(),
            ..Default::default()
        }
    }

    /// Creates a telephone input.
    pub fn tel() -> Self {
        Self {
            input_type: "tel".to_string(),
            ..Default::default()
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets or clears the placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, text: Option<String>) -> Self {
        self.placeholder = text;
        self
    }
}

impl Widget for TextInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();

        let name = html_escape(name);
        format!(
            r#"<input type="{}" id="{name}" name="{name}"{value_attr}{}{}>"#,
            self.input_type,
            placeholder_attr(self.placeholder.as_ref()),
            attrs.to_html()
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// Multi-line text widget.
#[derive(Debug, Clone)]
pub struct Textarea {
    /// Number of rows.
    pub rows: usize,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for Textarea {
    fn default() -> Self {
        Self {
            rows: 5,
            placeholder: None,
        }
    }
}

impl Textarea {
    /// Creates a textarea with the given rows.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            placeholder: None,
        }
    }

    /// Sets or clears the placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, text: Option<String>) -> Self {
        self.placeholder = text;
        self
    }
}

impl Widget for Textarea {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let content = value.map(html_escape).unwrap_or_default();
        let name = html_escape(name);
        format!(
            r#"<textarea id="{name}" name="{name}" rows="{}"{}{}>{content}</textarea>"#,
            self.rows,
            placeholder_attr(self.placeholder.as_ref()),
            attrs.to_html()
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Dropdown widget.
#[derive(Debug, Clone)]
pub struct Select {
    /// Available choices (value, label).
    pub choices: Vec<(String, String)>,
    /// Label of the leading empty option.
    pub blank_label: String,
}

impl Select {
    /// Creates a select with the given choices.
    pub fn new(choices: Vec<(String, String)>) -> Self {
        Self {
            choices,
            blank_label: "Selecciona una opción".to_string(),
        }
    }

    /// Sets the blank label.
    #[must_use]
    pub fn blank_label(mut self, label: impl Into<String>) -> Self {
        self.blank_label = label.into();
        self
    }
}

impl Widget for Select {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let mut options = format!(
            r#"<option value="">{}</option>"#,
            html_escape(&self.blank_label)
        );

        for (opt_value, label) in &self.choices {
            let selected = value.is_some_and(|v| v == opt_value);
            let selected_attr = if selected { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{}"{selected_attr}>{}</option>"#,
                html_escape(opt_value),
                html_escape(label)
            ));
        }

        let name = html_escape(name);
        format!(
            r#"<select id="{name}" name="{name}"{}>{options}</select>"#,
            attrs.to_html()
        )
    }

    fn input_type(&self) -> &str {
        "select"
    }
}
