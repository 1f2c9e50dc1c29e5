//! Console settings.
//!
//! Resolved in layers, later ones winning: built-in defaults, the JSON
//! settings file, then `CONSOLE_API_URL` / `CONSOLE_API_TOKEN` (from the
//! environment or a `.env` file) and command-line flags, which clap merges
//! before they reach [`Settings::with_overrides`].

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use console_lib::ConsoleClient;
use console_lib::api::query::PageSize;
use console_lib::auth::NoTokenProvider;
use console_lib::auth::StaticTokenProvider;
use console_lib::rate_limit::RetryConfig;
use log::debug;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API root without the version prefix.
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub api_version: String,
    pub page_size: u32,
    pub search_debounce_ms: u64,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            api_version: "v1".to_string(),
            page_size: PageSize::default().get(),
            search_debounce_ms: 500,
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

impl Settings {
    /// Reads a settings file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                debug!("loaded settings from {}", path.display());
                Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))
    }

    /// Applies values from the environment or command line.
    pub fn with_overrides(mut self, url: Option<String>, token: Option<String>) -> Self {
        if url.is_some() {
            self.api_url = url;
        }
        if token.is_some() {
            self.api_token = token;
        }
        self
    }

    pub fn page_size(&self) -> Result<PageSize> {
        Ok(PageSize::try_from(self.page_size)?)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Builds an API client. Without a token only `login` will succeed.
    pub fn client(&self) -> Result<ConsoleClient> {
        let url = self
            .api_url
            .as_deref()
            .ok_or_else(|| anyhow!("no API URL configured; pass --url or set CONSOLE_API_URL"))?;
        let builder = ConsoleClient::builder()
            .url(url)
            .api_version(&self.api_version)
            .timeout(Duration::from_secs(self.timeout_secs))
            .retry(RetryConfig::default().max_retries(self.max_retries));
        let client = match &self.api_token {
            Some(token) => builder.token_provider(StaticTokenProvider::new(token)).build()?,
            None => builder.token_provider(NoTokenProvider).build()?,
        };
        Ok(client)
    }
}
