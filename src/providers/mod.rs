use crate::core::error::AgentError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod gemini;

/// Who produced a conversation turn. `Operator` maps to the wire role
/// `user`, `Agent` to `model`; synthetic tool output re-enters as an
/// Operator turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnRole {
    Operator,
    Agent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ChatTurn {
    pub fn operator(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Operator,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Agent,
            text: text.into(),
        }
    }
}

/// Seam between the agent loop and the remote text-generation service.
///
/// The only suspension point in a turn: implementations perform one bounded
/// HTTP request per call and never retry internally.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        turns: &[ChatTurn],
    ) -> Result<String, AgentError>;
}
