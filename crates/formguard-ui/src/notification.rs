//! Toast notifications shown after submit attempts.

use ironhtml::html;
use ironhtml_elements::Div;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
    /// Neutral information.
    Info,
}

impl NotificationKind {
    /// Returns the icon shown next to the text.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
            Self::Info => "ℹ️",
        }
    }

    /// Returns the CSS modifier name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// A notification with a title and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Notification {
    /// Creates a notification.
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Creates a success notification.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, message)
    }

    /// Creates an error notification.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title, message)
    }

    /// Creates an informational notification.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title, message)
    }

    /// Shown after a successful submission.
    pub fn sent() -> Self {
        Self::success(
            "¡Mensaje enviado exitosamente!",
            "Gracias por contactarnos. Te responderemos pronto.",
        )
    }

    /// Shown when submit is blocked by invalid fields.
    pub fn invalid_form() -> Self {
        Self::error(
            "Error en el formulario",
            "Por favor, corrige los errores antes de enviar",
        )
    }

    /// Shown when the submitter fails.
    pub fn submit_failed() -> Self {
        Self::error(
            "Error en el formulario",
            "Error al enviar el formulario. Por favor, intenta nuevamente.",
        )
    }

    /// Renders the notification markup.
    pub fn render(&self) -> String {
        let class = format!("notification notification-{}", self.kind.as_str());
        let close = html! {
            button.type_("button").class("notification-close") {
                "×"
            }
        };

        html! { div.class(#class) }
            .child::<Div, _>(|content| {
                content
                    .class("notification-content")
                    .child::<Div, _>(|d| d.class("notification-icon").text(self.kind.icon()))
                    .child::<Div, _>(|d| {
                        d.class("notification-text")
                            .child::<Div, _>(|t| {
                                t.class("notification-title").text(self.title.as_str())
                            })
                            .child::<Div, _>(|m| {
                                m.class("notification-message").text(self.message.as_str())
                            })
                    })
                    .raw(close.render())
            })
            .render()
    }
}
