//! Service client: settings resolution and model fallback.
//!
//! The fallback ladder is an explicit policy object rather than nested
//! retries: candidates are tried in order, and an authorization failure
//! stops the ladder immediately since every candidate would fail the same
//! way.

use crate::agent::runner::{AgentRunner, ProgressObserver};
use crate::config::{ConnectionSettings, DEFAULT_MODEL_LADDER};
use crate::core::error::AgentError;
use crate::fleet::{FleetControl, NetworkSnapshot};
use crate::providers::ChatTurn;
use crate::providers::gemini::GeminiClient;
use crate::tools::ToolContext;
use std::time::Duration;
use tracing::warn;

/// Everything a `send_message` invocation borrows from the outside world.
pub struct AgentContext<'a> {
    pub snapshot: &'a NetworkSnapshot,
    pub control: &'a dyn FleetControl,
    pub settings: &'a ConnectionSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPolicy {
    candidates: Vec<String>,
}

impl FallbackPolicy {
    pub fn from_settings(settings: &ConnectionSettings) -> Self {
        let model = settings.model_name.trim();
        let candidates = if settings.use_custom_endpoint && !model.is_empty() {
            vec![model.to_string()]
        } else {
            DEFAULT_MODEL_LADDER.iter().map(|m| m.to_string()).collect()
        };
        Self { candidates }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Advance past `err`, or stop the ladder?
    pub fn halts_on(err: &AgentError) -> bool {
        err.is_auth_failure()
    }
}

pub struct AgentService {
    runner: AgentRunner,
}

impl AgentService {
    pub fn new() -> Self {
        Self {
            runner: AgentRunner::new(),
        }
    }

    /// Drive one conversation turn-set to a final answer.
    ///
    /// Only configuration and transport errors surface as `Err`; protocol
    /// misses, business-logic misses, and budget exhaustion come back as
    /// conversational text. The caller's history is read, never written.
    pub async fn send_message(
        &self,
        history: &[ChatTurn],
        message: &str,
        context: &AgentContext<'_>,
        on_progress: ProgressObserver<'_>,
    ) -> Result<String, AgentError> {
        let settings = context.settings;
        let api_key = settings.resolve_api_key().ok_or(AgentError::MissingApiKey)?;
        let base_url = settings.effective_base_url().to_string();
        let timeout = Duration::from_secs(settings.request_timeout_secs);
        let policy = FallbackPolicy::from_settings(settings);

        let tool_context = ToolContext {
            snapshot: context.snapshot,
            control: context.control,
        };

        let mut last_error = AgentError::Config("no candidate models configured".to_string());
        for model in policy.candidates() {
            let backend = GeminiClient::new(
                base_url.clone(),
                api_key.clone(),
                model.clone(),
                timeout,
            )?;
            match self
                .runner
                .run(&backend, history, message, &tool_context, on_progress)
                .await
            {
                Ok(answer) => return Ok(answer),
                Err(err) => {
                    warn!(model = %model, error = %err, "model candidate failed");
                    let halt = FallbackPolicy::halts_on(&err);
                    last_error = err;
                    if halt {
                        break;
                    }
                }
            }
        }
        Err(last_error)
    }
}

impl Default for AgentService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_settings_pin_a_single_candidate() {
        let settings = ConnectionSettings {
            use_custom_endpoint: true,
            model_name: "my-proxy-model".to_string(),
            ..ConnectionSettings::default()
        };
        let policy = FallbackPolicy::from_settings(&settings);
        assert_eq!(policy.candidates(), ["my-proxy-model".to_string()]);
    }

    #[test]
    fn default_settings_use_the_ladder() {
        let policy = FallbackPolicy::from_settings(&ConnectionSettings::default());
        assert_eq!(policy.candidates().len(), 3);
        assert_eq!(policy.candidates()[0], "gemini-2.5-flash");
    }

    #[test]
    fn ladder_halts_only_on_authorization_failures() {
        assert!(FallbackPolicy::halts_on(&AgentError::Api {
            status: 401,
            body: String::new()
        }));
        assert!(FallbackPolicy::halts_on(&AgentError::Api {
            status: 403,
            body: String::new()
        }));
        assert!(!FallbackPolicy::halts_on(&AgentError::Api {
            status: 500,
            body: String::new()
        }));
        assert!(!FallbackPolicy::halts_on(&AgentError::Network(
            "timeout".to_string()
        )));
    }

    #[tokio::test]
    async fn missing_key_short_circuits_before_any_call() {
        use crate::fleet::InMemoryFleetControl;
        use crate::fleet::mock::mock_snapshot;

        let snapshot = mock_snapshot();
        let control = InMemoryFleetControl::new(&snapshot);
        let settings = ConnectionSettings {
            use_custom_endpoint: true,
            api_key: String::new(),
            ..ConnectionSettings::default()
        };
        let context = AgentContext {
            snapshot: &snapshot,
            control: &control,
            settings: &settings,
        };
        let err = AgentService::new()
            .send_message(&[], "list devices", &context, &|_, _| {})
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::MissingApiKey));
    }
}
