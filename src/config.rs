use crate::core::error::AgentError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Candidate ladder tried in order when no custom model is configured.
pub const DEFAULT_MODEL_LADDER: &[&str] =
    &["gemini-2.5-flash", "gemini-2.0-flash", "gemini-1.5-flash"];

/// Ambient credential consulted when the settings store carries no key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    pub use_custom_endpoint: bool,
    pub api_key: String,
    pub base_url: String,
    pub model_name: String,
    /// Upper bound for each remote model call; a timeout is a transport error.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            use_custom_endpoint: false,
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model_name: DEFAULT_MODEL_LADDER[0].to_string(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl ConnectionSettings {
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".netguardian.yaml")
    }

    pub fn load() -> ConnectionSettings {
        let config_path = Self::config_path();

        if config_path.exists() {
            if let Ok(contents) = fs::read_to_string(&config_path) {
                if let Ok(settings) = serde_yml::from_str::<ConnectionSettings>(&contents) {
                    return settings;
                }
            }
            return ConnectionSettings::default();
        }

        let settings = ConnectionSettings::default();
        let _ = settings.save();
        settings
    }

    pub fn save(&self) -> Result<(), AgentError> {
        let yaml = serde_yml::to_string(self)?;
        fs::write(Self::config_path(), yaml)?;
        Ok(())
    }

    /// Credential resolution: a custom endpoint requires its own key; the
    /// default path prefers the ambient environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        let stored = self.api_key.trim();
        if self.use_custom_endpoint {
            return (!stored.is_empty()).then(|| stored.to_string());
        }
        std::env::var(API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| (!stored.is_empty()).then(|| stored.to_string()))
    }

    /// Base URL honored only when the custom-endpoint flag is on.
    pub fn effective_base_url(&self) -> &str {
        let trimmed = self.base_url.trim();
        if self.use_custom_endpoint && !trimmed.is_empty() {
            trimmed
        } else {
            DEFAULT_BASE_URL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_endpoint_requires_its_own_key() {
        let settings = ConnectionSettings {
            use_custom_endpoint: true,
            api_key: "  ".to_string(),
            ..ConnectionSettings::default()
        };
        assert!(settings.resolve_api_key().is_none());
    }

    #[test]
    fn base_url_falls_back_to_default_when_custom_is_off() {
        let settings = ConnectionSettings {
            use_custom_endpoint: false,
            base_url: "https://proxy.internal".to_string(),
            ..ConnectionSettings::default()
        };
        assert_eq!(settings.effective_base_url(), DEFAULT_BASE_URL);
    }
}
