use crate::core::error::AgentError;
use crate::providers::gemini::endpoint;
use crate::providers::gemini::types::*;
use crate::providers::{ChatTurn, ModelBackend, TurnRole};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            api_key,
            model,
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_payload(&self, system_instruction: &str, turns: &[ChatTurn]) -> GeminiRequest {
        let contents = turns
            .iter()
            .map(|turn| GeminiContentPart {
                role: match turn.role {
                    TurnRole::Operator => "user".to_string(),
                    TurnRole::Agent => "model".to_string(),
                },
                parts: vec![GeminiPart {
                    text: turn.text.clone(),
                }],
            })
            .collect();

        GeminiRequest {
            contents,
            system_instruction: Some(SystemInstruction {
                parts: vec![GeminiPart {
                    text: system_instruction.to_string(),
                }],
            }),
            generation_config: GenerationConfig::default(),
        }
    }
}

#[async_trait]
impl ModelBackend for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        turns: &[ChatTurn],
    ) -> Result<String, AgentError> {
        let url = endpoint::resolve(&self.base_url, &self.model, &self.api_key);
        let payload = self.build_payload(system_instruction, turns);

        let response = self.http.post(&url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            AgentError::Serialization(format!("Failed to parse model response: {}", e))
        })?;

        parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| AgentError::Api {
                status: status.as_u16(),
                body: "No candidate text in model response".to_string(),
            })
    }
}
