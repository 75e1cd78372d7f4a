//! Character counter for length-limited fields.

use ironhtml::html;

/// How close a value is to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTone {
    /// At most 70% of the limit.
    Normal,
    /// Above 70% of the limit.
    Warning,
    /// Above 90% of the limit.
    Danger,
}

impl CounterTone {
    /// Returns the CSS modifier name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// A `current/max` reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterReading {
    /// Characters typed, surrounding whitespace included.
    pub length: usize,
    /// The limit.
    pub max: usize,
    /// Tone derived from the ratio.
    pub tone: CounterTone,
}

impl CounterReading {
    /// Measures a value against a limit.
    pub fn measure(value: &str, max: usize) -> Self {
        let length = value.chars().count();
        let scaled = length.saturating_mul(10);
        let tone = if scaled > max.saturating_mul(9) {
            CounterTone::Danger
        } else if scaled > max.saturating_mul(7) {
            CounterTone::Warning
        } else {
            CounterTone::Normal
        };
        Self { length, max, tone }
    }

    /// Returns `current/max`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.length, self.max)
    }

    /// Returns whether the limit is exceeded.
    pub fn is_over(&self) -> bool {
        self.length > self.max
    }

    /// Renders the counter markup.
    pub fn render(&self) -> String {
        let class = format!("character-counter character-counter-{}", self.tone.as_str());
        let label = self.label();
        html! {
            div.class(#class) { #label }
        }
        .render()
    }
}
