use crate::cli::Args;
use crate::commands::{ChatState, dispatcher::CommandDispatcher};
use crate::config::ConnectionSettings;
use crate::core::error::AgentError;
use crate::display;
use crate::fleet::{InMemoryFleetControl, NetworkSnapshot};
use crate::input;
use crate::lang;
use crate::providers::ChatTurn;
use crate::service::{AgentContext, AgentService};

/// The operator console: owns the conversation history and plays the role of
/// the UI collaborator around the agent core.
pub struct Application {
    args: Args,
    service: AgentService,
    control: InMemoryFleetControl,
    command_dispatcher: CommandDispatcher,
}

impl Application {
    pub fn new(
        args: Args,
        snapshot: &NetworkSnapshot,
        command_dispatcher: CommandDispatcher,
    ) -> Self {
        Self {
            args,
            service: AgentService::new(),
            control: InMemoryFleetControl::new(snapshot),
            command_dispatcher,
        }
    }

    pub async fn run(
        &mut self,
        settings: ConnectionSettings,
        snapshot: NetworkSnapshot,
    ) -> Result<(), AgentError> {
        let mut state = ChatState::new(settings, snapshot);

        if let Some(query) = self.args.query.clone() {
            self.answer(&mut state, &query).await;
            return Ok(());
        }

        self.interactive_loop(&mut state).await
    }

    async fn interactive_loop(&self, state: &mut ChatState) -> Result<(), AgentError> {
        display::display_welcome(lang::Language::En);
        let mut editor = input::create_editor(self.command_dispatcher.clone())?;

        loop {
            let input = match input::read_input(&mut editor)? {
                Some(line) => line.trim().to_string(),
                None => break,
            };

            if input.is_empty() {
                continue;
            }

            if let Some(rest) = input.strip_prefix('/') {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                if let Some((command, args)) = parts.split_first() {
                    match self.command_dispatcher.execute(command, args, state) {
                        Ok(Some(output)) => println!("{}", output),
                        Ok(None) => {}
                        Err(e) => display::display_error(&e.to_string()),
                    }
                    if !state.should_continue {
                        break;
                    }
                }
                continue;
            }

            self.answer(state, &input).await;
        }

        input::save_history(&mut editor)?;
        Ok(())
    }

    /// One `send_message` round trip; only completed exchanges reach history.
    async fn answer(&self, state: &mut ChatState, message: &str) {
        let language = lang::detect(message);
        let context = AgentContext {
            snapshot: &state.snapshot,
            control: &self.control,
            settings: &state.settings,
        };

        let result = self
            .service
            .send_message(&state.history, message, &context, &|tool, args| {
                display::display_progress(tool, args);
            })
            .await;

        match result {
            Ok(answer) => {
                state.history.push(ChatTurn::operator(message));
                state.history.push(ChatTurn::agent(answer.clone()));
                display::display_answer(&answer);
            }
            Err(AgentError::MissingApiKey) => {
                display::display_error(language.api_key_missing());
            }
            Err(err) => {
                display::display_error(&format!("{} ({})", language.comm_error(), err));
            }
        }
    }
}
