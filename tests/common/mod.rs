//! Shared test transport.

#![allow(dead_code)]

use pong_turns::{SubmitError, Submission, TurnTransport};
use std::sync::{Arc, Mutex};

/// Which transport method received a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Async,
    Form,
}

/// Transport that records every call and can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    pub calls: Arc<Mutex<Vec<(Channel, Submission)>>>,
    pub fail_async: bool,
    pub fail_form: bool,
}

impl RecordingTransport {
    pub fn failing_async() -> Self {
        Self {
            fail_async: true,
            ..Self::default()
        }
    }

    pub fn failing_everything() -> Self {
        Self {
            fail_async: true,
            fail_form: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(Channel, Submission)> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn record(&self, channel: Channel, submission: &Submission) {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push((channel, submission.clone()));
    }
}

#[async_trait::async_trait]
impl TurnTransport for RecordingTransport {
    async fn send_async(&self, submission: &Submission) -> Result<(), SubmitError> {
        self.record(Channel::Async, submission);
        if self.fail_async {
            Err(SubmitError::new("async endpoint unavailable"))
        } else {
            Ok(())
        }
    }

    async fn send_form(&self, submission: &Submission) -> Result<(), SubmitError> {
        self.record(Channel::Form, submission);
        if self.fail_form {
            Err(SubmitError::new("form rejected"))
        } else {
            Ok(())
        }
    }
}
