//! HTTP transport for completion requests

use std::time::Duration;

use super::SummaryError;

/// Status and body of an endpoint reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Sends one JSON request and hands back whatever the endpoint replied.
/// Non-success statuses are replies, not errors; only failures to talk to the
/// endpoint at all are `Err`.
pub trait CompletionTransport {
    fn post_json(&self, url: &str, api_key: &str, body: &str) -> Result<HttpReply, SummaryError>;
}

/// Blocking transport backed by ureq
pub struct UreqTransport {
    agent: ureq::Agent,
    user_agent: String,
}

impl UreqTransport {
    /// `timeout` of `None` keeps ureq's default
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();
        let user_agent = format!(
            "recap/{} ({})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS
        );
        Self {
            agent: ureq::Agent::new_with_config(config),
            user_agent,
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CompletionTransport for UreqTransport {
    fn post_json(&self, url: &str, api_key: &str, body: &str) -> Result<HttpReply, SummaryError> {
        let mut response = self
            .agent
            .post(url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .header("User-Agent", self.user_agent.as_str())
            .send(body)
            .map_err(|e| SummaryError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| SummaryError::Transport(e.to_string()))?;

        Ok(HttpReply { status, body })
    }
}
