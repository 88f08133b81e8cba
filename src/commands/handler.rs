use super::ChatState;
use crate::core::error::AgentError;
use console::style;

pub trait CommandHandler: Send + Sync {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, AgentError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct ClearCommand;
pub struct DevicesCommand;
pub struct ModelCommand;

impl CommandHandler for QuitCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, AgentError> {
        state.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - Exit the console"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(
        &self,
        _state: &mut ChatState,
        _args: &[&str],
    ) -> Result<Option<String>, AgentError> {
        let title = style("Available Commands").bold().underlined();
        let help_text = vec![
            title.to_string(),
            style(QuitCommand.help()).to_string(),
            style(HelpCommand.help()).to_string(),
            style(ClearCommand.help()).to_string(),
            style(DevicesCommand.help()).to_string(),
            style(ModelCommand.help()).to_string(),
        ]
        .join("\n");

        Ok(Some(help_text))
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

impl CommandHandler for ClearCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, AgentError> {
        state.history.clear();
        Ok(Some("Conversation history cleared.".to_string()))
    }

    fn help(&self) -> &'static str {
        "/clear - Clear conversation history"
    }
}

impl CommandHandler for DevicesCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, AgentError> {
        let mut lines = vec![format!(
            "{:<10} {:<16} {:<10} {:<12} {}",
            "ID", "NAME", "VENDOR", "IP", "STATUS"
        )];
        for device in &state.snapshot.devices {
            lines.push(format!(
                "{:<10} {:<16} {:<10} {:<12} {:?}",
                device.id,
                device.name,
                device.vendor.as_str(),
                device.ip,
                device.status
            ));
        }
        Ok(Some(lines.join("\n")))
    }

    fn help(&self) -> &'static str {
        "/devices - List the device fleet"
    }
}

impl CommandHandler for ModelCommand {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, AgentError> {
        if args.is_empty() {
            Ok(Some(format!("Current model: {}", state.settings.model_name)))
        } else {
            state.settings.model_name = args[0].to_string();
            state.settings.use_custom_endpoint = true;
            Ok(Some(format!(
                "Model changed to: {} (custom endpoint settings now apply)",
                state.settings.model_name
            )))
        }
    }

    fn help(&self) -> &'static str {
        "/model <name> - Show or change the model"
    }
}
