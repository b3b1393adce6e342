//! Recap configuration
//!
//! Configuration is stored in `.recap/config.toml` inside the vault unless an
//! explicit path is given. Every core operation receives the config as an
//! argument; nothing reads it from ambient state.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::bail_invalid;
use crate::error::{RecapError, Result};

pub use types::{
    RecapConfig, SummaryModel, DEFAULT_API_BASE_URL, DEFAULT_NOTE_EXTENSION,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_PROMPT_PREFIX,
};

/// Directory inside the vault holding recap's own files
pub const CONFIG_DIR: &str = ".recap";
/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

const API_KEY_ENV_VAR: &str = "RECAP_API_KEY";
const API_BASE_URL_ENV_VAR: &str = "RECAP_API_BASE_URL";

impl RecapConfig {
    /// Default config location for a vault
    pub fn default_path(vault: &Path) -> PathBuf {
        vault.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| RecapError::io_operation("read config", path.display(), e))?;
        let config: RecapConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "config file missing, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file, creating its directory
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| RecapError::io_operation("create directory", dir.display(), e))?;
        }
        let content = self.to_toml()?;
        fs::write(path, content)
            .map_err(|e| RecapError::io_operation("write config", path.display(), e))?;
        Ok(())
    }

    /// Render as the TOML written by [`save`](Self::save)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RecapError::Other(format!("failed to serialize config: {}", e)))
    }

    /// Apply `RECAP_API_KEY` and `RECAP_API_BASE_URL` when set
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(API_KEY_ENV_VAR).ok(),
            std::env::var(API_BASE_URL_ENV_VAR).ok(),
        );
    }

    fn apply_overrides(&mut self, api_key: Option<String>, base_url: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            self.api_key = key;
        }
        if let Some(url) = base_url.filter(|u| !u.is_empty()) {
            self.api_base_url = url;
        }
    }

    /// Reject note settings no recap flow can work with. Endpoint settings
    /// are checked separately by [`check_endpoint`](Self::check_endpoint) so a
    /// bad summarizer setup never blocks writing digests.
    pub fn validate(&self) -> Result<()> {
        let ext = &self.note_extension;
        if ext.is_empty() || ext.starts_with('.') {
            bail_invalid!("note_extension", format!("{:?}", ext));
        }
        for (name, folder) in self.folders() {
            if folder.split(['/', '\\']).any(|part| part.trim() == "..") {
                bail_invalid!(name, format!("{:?} (folders must stay inside the vault)", folder));
            }
        }
        Ok(())
    }

    /// Reject endpoint settings a summary request cannot be sent with
    pub fn check_endpoint(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            bail_invalid!("api_base_url", &self.api_base_url);
        }
        if self.request_timeout_secs == Some(0) {
            bail_invalid!("request_timeout_secs", 0);
        }
        Ok(())
    }

    fn folders(&self) -> [(&'static str, &str); 6] {
        [
            ("monthly_input_folder", &self.monthly_input_folder),
            ("monthly_output_folder", &self.monthly_output_folder),
            ("weekly_input_folder", &self.weekly_input_folder),
            ("weekly_output_folder", &self.weekly_output_folder),
            ("summary_input_folder", &self.summary_input_folder),
            ("summary_output_folder", &self.summary_output_folder),
        ]
    }

    /// Whether a completion credential is configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Copy with the API key masked, for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.has_api_key() {
            let tail: String = {
                let chars: Vec<char> = copy.api_key.chars().collect();
                chars[chars.len().saturating_sub(4)..].iter().collect()
            };
            copy.api_key = format!("****{}", tail);
        }
        copy
    }
}
