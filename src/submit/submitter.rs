//! Hands submissions to a transport, falling back from async to form.

use super::error::SubmitError;
use super::payload::Submission;
use super::transport::TurnTransport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Which channel delivered a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    /// The background request succeeded.
    Async,
    /// The form post succeeded, after the async request failed or was disabled.
    Form,
}

/// Cosmetic pauses before a submission is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitDelays {
    /// After the last cup of a center shot is marked.
    pub hit: Duration,
    /// After a rim or miss is pressed.
    pub outcome: Duration,
    /// After a new opponent format is chosen.
    pub format_change: Duration,
}

impl SubmitDelays {
    /// No pauses at all.
    pub fn none() -> Self {
        Self {
            hit: Duration::ZERO,
            outcome: Duration::ZERO,
            format_change: Duration::ZERO,
        }
    }

    /// Pause that precedes `submission`.
    pub fn for_submission(&self, submission: &Submission) -> Duration {
        match submission {
            Submission::Turn(payload) if payload.outcome().needs_targets() => self.hit,
            Submission::Turn(_) => self.outcome,
            Submission::FormatChange { .. } => self.format_change,
        }
    }
}

impl Default for SubmitDelays {
    fn default() -> Self {
        Self {
            hit: Duration::from_millis(300),
            outcome: Duration::from_millis(500),
            format_change: Duration::from_millis(1200),
        }
    }
}

/// Pending delivery of one submission.
pub type SubmitHandle = JoinHandle<Result<Delivery, SubmitError>>;

/// Submits resolved turns through a transport.
#[derive(Clone)]
pub struct TurnSubmitter {
    transport: Arc<dyn TurnTransport>,
    delays: SubmitDelays,
    async_first: bool,
}

impl std::fmt::Debug for TurnSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnSubmitter")
            .field("delays", &self.delays)
            .field("async_first", &self.async_first)
            .finish_non_exhaustive()
    }
}

impl TurnSubmitter {
    /// Creates a submitter that tries the async channel first.
    pub fn new(transport: Arc<dyn TurnTransport>, delays: SubmitDelays) -> Self {
        Self {
            transport,
            delays,
            async_first: true,
        }
    }

    /// Skips the async channel and always posts the form.
    pub fn form_only(mut self) -> Self {
        self.async_first = false;
        self
    }

    /// Configured delays.
    pub fn delays(&self) -> SubmitDelays {
        self.delays
    }

    /// Delivers a submission now.
    ///
    /// An async failure is logged and recovered with a form post; only a
    /// failing form post is returned as an error.
    #[instrument(skip(self, submission), fields(format = %submission.format(), async_first = self.async_first))]
    pub async fn deliver(&self, submission: &Submission) -> Result<Delivery, SubmitError> {
        if self.async_first {
            match self.transport.send_async(submission).await {
                Ok(()) => return Ok(Delivery::Async),
                Err(e) => warn!(error = %e, "Async submit failed, falling back to form"),
            }
        }

        match self.transport.send_form(submission).await {
            Ok(()) => {
                info!("Submission delivered by form");
                Ok(Delivery::Form)
            }
            Err(e) => {
                error!(error = %e, "Form submit failed");
                Err(e)
            }
        }
    }

    /// Schedules a submission on the current Tokio runtime after its cosmetic delay.
    ///
    /// Returns at once; the caller does not wait for the server. Without a
    /// running runtime nothing is scheduled and an error is returned.
    #[instrument(skip(self, submission))]
    pub fn submit(&self, submission: Submission) -> Result<SubmitHandle, SubmitError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SubmitError::new(format!("No runtime to schedule submission: {}", e)))?;
        let delay = self.delays.for_submission(&submission);
        let submitter = self.clone();
        debug!(delay_ms = delay.as_millis() as u64, "Scheduling submission");

        Ok(runtime.spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            submitter.deliver(&submission).await
        }))
    }
}
