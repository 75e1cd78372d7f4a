//! Field definitions and form rendering.

use ironhtml::html;
use ironhtml_elements::{Div, Span};

use formguard_core::{FieldState, FieldStatus, FormConfig, FormSpec};

use crate::controller::{FormController, SubmitState};
use crate::submit::Submitter;
use crate::widgets::{widget_for, TextInput, Widget, WidgetAttrs};

/// Presentation of a form field.
pub struct FormFieldDef {
    /// Field name.
    pub name: String,
    /// Field label.
    pub label: String,
    /// Whether the field is required.
    pub required: bool,
    /// The widget to render.
    pub widget: Box<dyn Widget>,
    /// Widget attributes.
    pub attrs: WidgetAttrs,
}

impl std::fmt::Debug for FormFieldDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormFieldDef")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("required", &self.required)
            .field("input_type", &self.widget.input_type())
            .finish_non_exhaustive()
    }
}

impl FormFieldDef {
    /// Creates a new field definition.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        widget: impl Widget + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
            widget: Box::new(widget),
            attrs: WidgetAttrs::new(),
        }
    }

    /// Makes the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets a widget attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }
}

/// Builds field definitions for every field of a spec, taking labels and
/// widgets from the configuration when it describes the field.
pub fn field_defs(config: &FormConfig, spec: &FormSpec) -> Vec<FormFieldDef> {
    spec.fields()
        .iter()
        .map(|field| {
            let (label, widget): (String, Box<dyn Widget>) = match config.field(&field.name) {
                Some(field_config) => (field_config.label().to_string(), widget_for(field_config)),
                None => (field.name.clone(), Box::new(TextInput::text())),
            };
            FormFieldDef {
                name: field.name.clone(),
                label,
                required: field.is_required(),
                widget,
                attrs: WidgetAttrs::new(),
            }
        })
        .collect()
}

/// Renders a field with its validation state.
///
/// Invalid fields get the `invalid` class and a visible error message.
/// Valid fields get the `valid` class only when they hold a value.
pub fn render_field(field: &FormFieldDef, state: &FieldState) -> String {
    let (input_class, group_class) = match &state.status {
        FieldStatus::Invalid(_) => (Some("invalid"), "form-group error"),
        FieldStatus::Valid if !state.value.trim().is_empty() => {
            (Some("valid"), "form-group success")
        }
        _ => (None, "form-group"),
    };

    let mut attrs = field.attrs.clone();
    if let Some(class) = input_class {
        attrs.add_class(class);
    }
    if field.required {
        attrs.set("required", "required");
    }

    let value = Some(state.value.as_str()).filter(|v| !v.is_empty());
    let widget_html = field.widget.render(&field.name, value, &attrs);

    let id = field.name.as_str();
    let required_marker = if field.required { " *" } else { "" };
    let label_text = format!("{}{}", field.label, required_marker);
    let label_el = html! {
        label.for_(#id) { #label_text }
    };

    let error_id = format!("error-{}", field.name);
    let (error_class, error_text) = match state.message() {
        Some(message) => ("error-message show", message),
        None => ("error-message", ""),
    };

    html! { div.class(#group_class) }
        .raw(label_el.render())
        .raw(&widget_html)
        .child::<Div, _>(|d| {
            d.class(error_class)
                .attr("id", error_id.as_str())
                .text(error_text)
        })
        .render()
}

/// Renders the submit button for a lifecycle state.
pub fn render_submit_button(state: SubmitState) -> String {
    let (class, text, loader) = match state {
        SubmitState::Idle => ("submit-btn", "Enviar Mensaje", ""),
        SubmitState::Submitting => ("submit-btn loading", "Enviar Mensaje", "Enviando..."),
        SubmitState::Succeeded => ("submit-btn success", "¡Mensaje Enviado!", ""),
        SubmitState::Failed => ("submit-btn error", "Enviar Mensaje", ""),
    };

    let button = html! { button.type_("submit").class(#class) }
        .when(state == SubmitState::Submitting, |b| b.attr("disabled", "disabled"))
        .child::<Span, _>(|s| s.class("btn-text").text(text))
        .child::<Span, _>(|s| s.class("btn-loader").text(loader));
    button.render()
}

/// Renders the whole form from a controller's current state: progress bar,
/// fields, character counters for length-limited textareas, and the submit
/// button.
pub fn render_form<S: Submitter>(
    fields: &[FormFieldDef],
    controller: &FormController<S>,
    action: &str,
) -> String {
    let progress_html = controller.progress().render();

    let mut form = html! {
        form.action(#action).method("post")
    }
    .attr("id", "contactForm")
    .attr("novalidate", "novalidate")
    .child::<Div, _>(|d| d.raw(&progress_html));

    for field in fields {
        let Some(state) = controller.state(&field.name) else {
            continue;
        };
        let field_html = render_field(field, state);
        form = form.child::<Div, _>(|d| d.raw(&field_html));

        if field.widget.input_type() == "textarea" {
            if let Some(reading) = controller.counter(&field.name) {
                let counter_html = reading.render();
                form = form.child::<Div, _>(|d| d.raw(&counter_html));
            }
        }
    }

    let button_html = render_submit_button(controller.submit_state());
    form.child::<Div, _>(|d| d.raw(&button_html)).render()
}
