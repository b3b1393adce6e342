//! Configuration type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecapError;

/// Default chat completions base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Default note file extension (without the dot)
pub const DEFAULT_NOTE_EXTENSION: &str = "md";

/// Default system prompt sent with every summary request
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an assistant that writes concise recaps of personal journal notes. \
     Highlight recurring themes, accomplishments, and open threads.";

/// Default text placed in front of the digest in the user message
pub const DEFAULT_USER_PROMPT_PREFIX: &str = "Summarize the following notes from the past week:\n\n";

/// Completion models offered for summarization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SummaryModel {
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
}

impl SummaryModel {
    pub const ALL: [SummaryModel; 4] = [
        SummaryModel::Gpt4oMini,
        SummaryModel::Gpt4o,
        SummaryModel::Gpt4Turbo,
        SummaryModel::Gpt35Turbo,
    ];

    /// Model identifier as sent to the endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryModel::Gpt4oMini => "gpt-4o-mini",
            SummaryModel::Gpt4o => "gpt-4o",
            SummaryModel::Gpt4Turbo => "gpt-4-turbo",
            SummaryModel::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }
}

impl fmt::Display for SummaryModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryModel {
    type Err = RecapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SummaryModel::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| RecapError::invalid_value("model", s))
    }
}

/// Settings for every recap flow.
///
/// Missing keys in the TOML file fall back to [`RecapConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecapConfig {
    /// Folder scanned for monthly recaps ("" is the vault root)
    pub monthly_input_folder: String,
    /// Folder receiving `YYYY-MM.md` digests
    pub monthly_output_folder: String,
    /// Folder scanned for weekly recaps
    pub weekly_input_folder: String,
    /// Folder receiving `YYYY-Www.md` digests
    pub weekly_output_folder: String,
    /// Folder scanned by the previous-week summary
    pub summary_input_folder: String,
    /// Folder receiving `YYYY-Www Summary.md` documents
    pub summary_output_folder: String,

    /// Run the monthly recap at midnight on the 1st
    pub auto_generate_monthly: bool,
    /// Run the weekly recap at midnight on Sundays
    pub auto_generate_weekly: bool,
    /// Summarize weekly recaps before writing them
    pub enable_summarization: bool,

    /// Credential for the completion endpoint (empty = none)
    pub api_key: String,
    pub model: SummaryModel,
    pub system_prompt: String,
    pub user_prompt_prefix: String,

    /// Extension of note files, without the dot
    pub note_extension: String,
    /// Base URL of the chat completions API
    pub api_base_url: String,
    /// Request timeout; `None` leaves the transport default in place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for RecapConfig {
    fn default() -> Self {
        Self {
            monthly_input_folder: String::new(),
            monthly_output_folder: "Recaps/Monthly".to_string(),
            weekly_input_folder: String::new(),
            weekly_output_folder: "Recaps/Weekly".to_string(),
            summary_input_folder: String::new(),
            summary_output_folder: "Recaps/Summaries".to_string(),
            auto_generate_monthly: false,
            auto_generate_weekly: false,
            enable_summarization: false,
            api_key: String::new(),
            model: SummaryModel::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_prompt_prefix: DEFAULT_USER_PROMPT_PREFIX.to_string(),
            note_extension: DEFAULT_NOTE_EXTENSION.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}
