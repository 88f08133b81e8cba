//! The turn-bounded conversation state machine.
//!
//! One `run` call drives: model call, envelope parse, dispatch, observation
//! append, repeat. The caller's history is never mutated; the runner works
//! on its own copy, so an aborted invocation leaves the conversation
//! replayable up to the last completed turn.

use crate::agent::envelope;
use crate::agent::prompt;
use crate::core::error::AgentError;
use crate::lang;
use crate::providers::{ChatTurn, ModelBackend};
use crate::tools::ToolContext;
use crate::tools::dispatcher::ToolDispatcher;
use crate::tools::registry::ToolRegistry;
use serde_json::Value;
use tracing::{debug, warn};

/// Model invocations allowed per `run`; exceeding it ends the conversation
/// with a fixed advisory rather than looping forever.
pub const MAX_TURNS: usize = 8;

/// Called with (tool name, serialized args) before each dispatch so a UI can
/// render live reasoning feedback.
pub type ProgressObserver<'a> = &'a (dyn Fn(&str, &str) + Send + Sync);

pub struct AgentRunner {
    registry: ToolRegistry,
    dispatcher: ToolDispatcher,
}

impl AgentRunner {
    pub fn new() -> Self {
        Self {
            registry: ToolRegistry::new(),
            dispatcher: ToolDispatcher::new(),
        }
    }

    pub async fn run(
        &self,
        backend: &dyn ModelBackend,
        history: &[ChatTurn],
        message: &str,
        context: &ToolContext<'_>,
        on_progress: ProgressObserver<'_>,
    ) -> Result<String, AgentError> {
        let language = lang::detect(message);
        let system = prompt::system_instruction(&self.registry, context.snapshot, language);

        let mut turns: Vec<ChatTurn> = history.to_vec();
        turns.push(ChatTurn::operator(message));

        for _ in 0..MAX_TURNS {
            let reply = backend.generate(&system, &turns).await?;
            turns.push(ChatTurn::agent(reply.clone()));

            let Some(call) = envelope::extract(&reply) else {
                return Ok(reply);
            };

            let observation = match self.registry.descriptor(&call.tool) {
                None => {
                    warn!(tool = %call.tool, "model requested an unknown tool");
                    format!("Tool '{}' not found.", call.tool)
                }
                Some(descriptor) => {
                    if !ToolRegistry::validate_args(descriptor, &call.args) {
                        // Known tool, malformed arguments: the reply is prose.
                        return Ok(reply);
                    }
                    let args_summary = Value::Object(call.args.clone()).to_string();
                    on_progress(&call.tool, &args_summary);
                    debug!(tool = %call.tool, args = %args_summary, "dispatching tool");
                    match self.dispatcher.execute(&call.tool, &call.args, context) {
                        Ok(result) => result,
                        Err(err) => {
                            warn!(error = %err, "tool dispatch failed");
                            format!("Tool '{}' not found.", call.tool)
                        }
                    }
                }
            };

            // The observation lands before the next model call; a tool call
            // never dangles across turns.
            turns.push(ChatTurn::operator(format!("TOOL_OUTPUT: {}", observation)));
        }

        Ok(language.max_turns_reached().to_string())
    }
}

impl Default for AgentRunner {
    fn default() -> Self {
        Self::new()
    }
}
