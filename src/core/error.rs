use std::io;
use thiserror::Error;

/// Unified error type for the NetGuardian agent core
#[derive(Error, Debug)]
pub enum AgentError {
    /// Remote model service answered with a non-2xx status
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No credential in the settings store or the environment
    #[error("API key is missing")]
    MissingApiKey,

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),

    /// Tool name missing from the registry; a protocol error, not an operator error
    #[error("Tool not found: {0}")]
    InvalidTool(String),
}

impl AgentError {
    /// Authorization failures stop the model fallback ladder immediately.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AgentError::Api {
                status: 401 | 403,
                ..
            }
        )
    }

    /// True for the error classes that abort a `send_message` invocation.
    pub fn is_transport(&self) -> bool {
        matches!(self, AgentError::Api { .. } | AgentError::Network(_))
    }
}

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AgentError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            AgentError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            AgentError::Api {
                status: err.status().map(|s| s.as_u16()).unwrap_or(0),
                body: err.to_string(),
            }
        } else {
            AgentError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for AgentError {
    fn from(err: serde_yml::Error) -> Self {
        AgentError::Serialization(format!("YAML error: {}", err))
    }
}
