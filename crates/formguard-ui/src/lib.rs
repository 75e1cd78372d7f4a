//! # formguard-ui
//!
//! Form controller, submission contract and HTML presentation for
//! [`formguard_core`] forms.
//!
//! This crate provides:
//! - A [`FormController`] driving input, blur and submit events
//! - The [`Submitter`] trait and a [`SimulatedSubmitter`] with latency and
//!   random failures
//! - Character counters, completion progress and notifications
//! - HTML widgets and whole-form rendering with validation feedback
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use formguard_core::{contact_form, ValidationEngine};
//! use formguard_ui::{FormController, SimulatedSubmitter, SubmitOutcome};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let engine = ValidationEngine::new(contact_form());
//! let mut controller = FormController::new(engine, SimulatedSubmitter::new(Duration::ZERO, 0.0));
//!
//! controller.input("telefono", "5551234567").unwrap();
//! assert_eq!(controller.state("telefono").unwrap().value, "(555) 123-4567");
//!
//! let outcome = controller.submit().await;
//! assert!(matches!(outcome, SubmitOutcome::Invalid { .. }));
//! # }
//! ```

mod controller;
mod counter;
mod error;
mod form;
mod notification;
mod progress;
mod submit;
pub mod widgets;

pub use controller::{FormController, SubmitOutcome, SubmitState};
pub use counter::{CounterReading, CounterTone};
pub use error::{Result, SubmitError};
pub use form::{field_defs, render_field, render_form, render_submit_button, FormFieldDef};
pub use notification::{Notification, NotificationKind};
pub use progress::{Progress, ProgressTone};
pub use submit::{Ack, SimulatedSubmitter, Submission, Submitter};
