//! Transports that carry submissions to the scoring server.

use super::error::SubmitError;
use super::payload::Submission;
use tracing::{debug, info, instrument};

/// A channel that delivers submissions.
///
/// `send_async` is the background request; `send_form` is the plain form
/// post it falls back to.
#[async_trait::async_trait]
pub trait TurnTransport: Send + Sync {
    /// Delivers the submission as an asynchronous request.
    async fn send_async(&self, submission: &Submission) -> Result<(), SubmitError>;

    /// Delivers the submission as a standard form post.
    async fn send_form(&self, submission: &Submission) -> Result<(), SubmitError>;
}

/// HTTP transport for the scoring server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    player: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport posting on behalf of `player`.
    #[instrument(skip_all, fields(base_url = %base_url, player = %player))]
    pub fn new(base_url: String, player: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            player,
            client: reqwest::Client::new(),
        }
    }

    /// Endpoint of the page form.
    pub fn form_url(&self) -> String {
        format!("{}/add/{}", self.base_url, self.player)
    }

    /// Endpoint of the background request.
    pub fn async_url(&self) -> String {
        format!("{}/api/turn/{}", self.base_url, self.player)
    }
}

#[async_trait::async_trait]
impl TurnTransport for HttpTransport {
    #[instrument(skip(self, submission), fields(format = %submission.format()))]
    async fn send_async(&self, submission: &Submission) -> Result<(), SubmitError> {
        let url = self.async_url();
        debug!(url = %url, "Posting submission as JSON");

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::new(format!("Async submit rejected: HTTP {} - {}", status, body)));
        }

        info!(status = %status, "Submission accepted");
        Ok(())
    }

    #[instrument(skip(self, submission), fields(format = %submission.format()))]
    async fn send_form(&self, submission: &Submission) -> Result<(), SubmitError> {
        let url = self.form_url();
        let fields = submission.form_fields();
        debug!(url = %url, fields = fields.len(), "Posting submission as form");

        let response = self.client.post(&url).form(&fields).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::new(format!("Form submit rejected: HTTP {}", status)));
        }

        info!(status = %status, "Form submission accepted");
        Ok(())
    }
}

/// Transport that only logs submissions. Used for dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait::async_trait]
impl TurnTransport for LogTransport {
    async fn send_async(&self, submission: &Submission) -> Result<(), SubmitError> {
        let json = serde_json::to_string(submission)
            .map_err(|e| SubmitError::new(format!("Failed to encode submission: {}", e)))?;
        info!(submission = %json, "Dry run: submission not sent");
        Ok(())
    }

    async fn send_form(&self, submission: &Submission) -> Result<(), SubmitError> {
        info!(fields = ?submission.form_fields(), "Dry run: form not posted");
        Ok(())
    }
}
