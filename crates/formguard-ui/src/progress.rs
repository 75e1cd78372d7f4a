//! Completion indicator over the required fields of a form.

use std::collections::HashMap;

use ironhtml::html;
use ironhtml_elements::Div;

use formguard_core::FormSpec;

/// Completion band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTone {
    /// Below 50%.
    Started,
    /// 50% or more.
    Halfway,
    /// Every required field filled.
    Complete,
}

impl ProgressTone {
    /// Returns the CSS modifier name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Halfway => "halfway",
            Self::Complete => "complete",
        }
    }
}

/// Share of required fields holding a non-blank value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Required fields with a value.
    pub filled: usize,
    /// Required fields.
    pub total: usize,
    /// Rounded percentage, 0 to 100.
    pub percent: usize,
}

impl Progress {
    /// Measures progress of a set of values. A form without required
    /// fields is complete.
    pub fn measure(spec: &FormSpec, values: &HashMap<String, String>) -> Self {
        let total = spec.required_fields().count();
        let filled = spec
            .required_fields()
            .filter(|field| {
                values
                    .get(&field.name)
                    .is_some_and(|value| !value.trim().is_empty())
            })
            .count();

        let percent = if total == 0 {
            100
        } else {
            (filled * 200 + total) / (total * 2)
        };

        Self {
            filled,
            total,
            percent,
        }
    }

    /// Returns the completion band.
    pub fn tone(&self) -> ProgressTone {
        match self.percent {
            100 => ProgressTone::Complete,
            50..=99 => ProgressTone::Halfway,
            _ => ProgressTone::Started,
        }
    }

    /// Returns the text shown under the bar.
    pub fn label(&self) -> String {
        format!("{}% completado", self.percent)
    }

    /// Renders the progress bar markup.
    pub fn render(&self) -> String {
        let fill_class = format!("form-progress-fill form-progress-{}", self.tone().as_str());
        let width = format!("width: {}%", self.percent);
        let label = self.label();

        html! { div.class("form-progress") }
            .child::<Div, _>(|bar| {
                bar.class("form-progress-bar").child::<Div, _>(|fill| {
                    fill.class(fill_class.as_str())
                        .attr("style", width.as_str())
                        .attr("data-percent", self.percent.to_string().as_str())
                })
            })
            .child::<Div, _>(|text| text.class("form-progress-text").text(label.as_str()))
            .render()
    }
}
