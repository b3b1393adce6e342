//! Summaries from a chat completions endpoint
//!
//! Summarization is best effort. [`SummaryClient::summarize`] never fails: any
//! problem yields [`SummaryOutcome::FellBack`] carrying the original text and
//! the reason, and the caller decides how to report it.

pub mod transport;
pub mod wire;

use thiserror::Error;

use crate::config::RecapConfig;
pub use transport::{CompletionTransport, HttpReply, UreqTransport};
use wire::{ChatRequest, ChatResponse, ErrorEnvelope};

const COMPLETIONS_PATH: &str = "/chat/completions";

/// Why a summary could not be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("no API key configured; summarization skipped")]
    MissingCredential,

    #[error("endpoint not usable: {0}")]
    Config(String),

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("endpoint returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no summary produced: response contained no choices")]
    NoChoices,
}

/// Result of one summarization attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Summarized(String),
    FellBack { text: String, reason: SummaryError },
}

impl SummaryOutcome {
    /// Text to persist, summarized or not
    pub fn text(&self) -> &str {
        match self {
            SummaryOutcome::Summarized(text) | SummaryOutcome::FellBack { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            SummaryOutcome::Summarized(text) | SummaryOutcome::FellBack { text, .. } => text,
        }
    }
}

/// Chat completions URL for a configured base URL
pub fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_PATH)
}

/// Interpret an endpoint reply
pub fn parse_reply(reply: &HttpReply) -> Result<String, SummaryError> {
    if !(200..300).contains(&reply.status) {
        let message = serde_json::from_str::<ErrorEnvelope>(&reply.body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| reply.body.trim().to_string());
        return Err(SummaryError::Status {
            status: reply.status,
            message,
        });
    }

    let response: ChatResponse =
        serde_json::from_str(&reply.body).map_err(|e| SummaryError::Malformed(e.to_string()))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(SummaryError::NoChoices)?;

    choice
        .message
        .content
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| SummaryError::Malformed("first choice has no content".to_string()))
}

/// Sends digests to the completion endpoint, one attempt per call
pub struct SummaryClient<T: CompletionTransport> {
    transport: T,
}

impl<T: CompletionTransport> SummaryClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Summarize `content`, falling back to it unchanged on any failure
    pub fn summarize(&self, content: &str, config: &RecapConfig) -> SummaryOutcome {
        match self.request_summary(content, config) {
            Ok(summary) => {
                tracing::debug!(model = %config.model, chars = summary.len(), "summary received");
                SummaryOutcome::Summarized(summary)
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "summarization fell back to original text");
                SummaryOutcome::FellBack {
                    text: content.to_string(),
                    reason,
                }
            }
        }
    }

    /// Plain-text form of [`summarize`](Self::summarize)
    pub fn summarize_text(&self, content: &str, config: &RecapConfig) -> String {
        self.summarize(content, config).into_text()
    }

    fn request_summary(&self, content: &str, config: &RecapConfig) -> Result<String, SummaryError> {
        if !config.has_api_key() {
            return Err(SummaryError::MissingCredential);
        }
        config
            .check_endpoint()
            .map_err(|e| SummaryError::Config(e.to_string()))?;

        let request = ChatRequest::for_digest(config, content);
        let body =
            serde_json::to_string(&request).map_err(|e| SummaryError::Encode(e.to_string()))?;
        let url = endpoint_url(&config.api_base_url);

        tracing::debug!(url = %url, model = %config.model, "requesting summary");
        let reply = self.transport.post_json(&url, config.api_key.trim(), &body)?;
        parse_reply(&reply)
    }
}
