//! The submission contract and a simulated implementation.

use std::time::Duration;

use futures::future::BoxFuture;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use formguard_core::FieldState;

use crate::error::{Result, SubmitError};

/// Field values sent on submit, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    fields: Vec<(String, String)>,
}

impl Submission {
    /// Creates an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a submission from field states, keeping raw values.
    pub fn from_states(states: &[FieldState]) -> Self {
        Self {
            fields: states
                .iter()
                .map(|state| (state.field.clone(), state.value.clone()))
                .collect(),
        }
    }

    /// Adds a field value.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Returns a field's value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over `(field, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the submission has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Submission {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Acknowledgement of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    /// Reference assigned by the receiver.
    pub reference: String,
}

/// Something that accepts form submissions.
///
/// # Example
///
/// ```ignore
/// struct Inbox;
///
/// impl Submitter for Inbox {
///     fn submit<'a>(&'a self, submission: &'a Submission) -> BoxFuture<'a, Result<Ack>> {
///         Box::pin(async move {
///             store(submission).await?;
///             Ok(Ack { reference: "inbox".to_string() })
///         })
///     }
/// }
/// ```
pub trait Submitter: Send + Sync {
    /// Sends a submission.
    fn submit<'a>(&'a self, submission: &'a Submission) -> BoxFuture<'a, Result<Ack>>;
}

impl<T: Submitter + ?Sized> Submitter for std::sync::Arc<T> {
    fn submit<'a>(&'a self, submission: &'a Submission) -> BoxFuture<'a, Result<Ack>> {
        (**self).submit(submission)
    }
}

/// A submitter that waits a fixed delay and then fails at random.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    failure_rate: f64,
}

impl SimulatedSubmitter {
    /// Default delay before answering.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);
    /// Default share of submissions that fail.
    pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

    /// Creates a simulated submitter. The failure rate is clamped to
    /// `0.0..=1.0`.
    pub fn new(delay: Duration, failure_rate: f64) -> Self {
        Self {
            delay,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    /// Returns the delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns the failure rate.
    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY, Self::DEFAULT_FAILURE_RATE)
    }
}

impl Submitter for SimulatedSubmitter {
    fn submit<'a>(&'a self, submission: &'a Submission) -> BoxFuture<'a, Result<Ack>> {
        Box::pin(async move {
            debug!(delay = ?self.delay, "simulating submission");
            tokio::time::sleep(self.delay).await;

            if rand::random::<f64>() < self.failure_rate {
                return Err(SubmitError::Rejected("simulated server error".to_string()));
            }

            let reference = format!("sim-{:08x}", rand::random::<u32>());
            info!(%reference, fields = submission.len(), "simulated submission accepted");
            Ok(Ack { reference })
        })
    }
}
