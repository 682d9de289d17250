//! Configuration loading.
//!
//! Defaults, then an optional JSON file, then `DESCRIPTIFY_*` environment
//! overrides. The platform API key is never serialized; it only comes from
//! the environment.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GENERATION_API_BASE, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_STRIPE_API_BASE,
    GENERATION_REQUEST_TIMEOUT, STORE_REQUEST_TIMEOUT,
};

/// Configuration for the descriptify host.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the secret-store and record-store API.
    pub stripe_api_base: String,
    /// Platform API key - NOT serialized to disk.
    #[serde(skip)]
    pub stripe_api_key: String,
    /// Base URL of the chat-completions API.
    pub generation_api_base: String,
    /// Model used for generation.
    pub model: String,
    /// Response-size ceiling for generation.
    pub max_tokens: u32,
    /// Timeout in seconds for secret-store and record-store calls.
    pub store_timeout_secs: u64,
    /// Timeout in seconds for the generation call.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stripe_api_base: DEFAULT_STRIPE_API_BASE.to_string(),
            stripe_api_key: String::new(),
            generation_api_base: DEFAULT_GENERATION_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            store_timeout_secs: STORE_REQUEST_TIMEOUT.as_secs(),
            request_timeout_secs: GENERATION_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Loads configuration from `path` (if given and present), with
    /// environment variable overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => Self::load_from_file(path)?,
            Some(path) => {
                log::debug!("Config file {} not found, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", path.display()))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, which maps a variable name to a value.
    ///
    /// Unparseable numeric values and zero timeouts are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base) = lookup("DESCRIPTIFY_STRIPE_API_BASE") {
            self.stripe_api_base = base;
        }

        if let Some(key) = lookup("DESCRIPTIFY_STRIPE_API_KEY") {
            self.stripe_api_key = key;
        }

        if let Some(base) = lookup("DESCRIPTIFY_GENERATION_API_BASE") {
            self.generation_api_base = base;
        }

        if let Some(model) = lookup("DESCRIPTIFY_MODEL") {
            self.model = model;
        }

        if let Some(max_tokens) = lookup("DESCRIPTIFY_MAX_TOKENS") {
            if let Ok(max) = max_tokens.parse::<u32>() {
                self.max_tokens = max;
            }
        }

        if let Some(secs) = lookup("DESCRIPTIFY_STORE_TIMEOUT")
            .as_deref()
            .and_then(parse_timeout_secs)
        {
            self.store_timeout_secs = secs;
        }

        if let Some(secs) = lookup("DESCRIPTIFY_REQUEST_TIMEOUT")
            .as_deref()
            .and_then(parse_timeout_secs)
        {
            self.request_timeout_secs = secs;
        }
    }

    /// Timeout for store calls.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// Timeout for the generation call.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check if a platform API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.stripe_api_key.is_empty()
    }
}

/// Parses a timeout in whole seconds. Zero would fail every request, so it
/// is rejected like any other invalid value.
fn parse_timeout_secs(value: &str) -> Option<u64> {
    value.parse::<u64>().ok().filter(|secs| *secs > 0)
}
