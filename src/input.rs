use crate::commands::dispatcher::CommandDispatcher;
use crate::core::error::AgentError;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, EditMode, Editor, Helper};
use std::path::{Path, PathBuf};

/// Completes slash commands against the console registry; history hints for
/// everything else.
pub struct ConsoleHelper {
    command_registry: CommandDispatcher,
    hinter: HistoryHinter,
}

impl ConsoleHelper {
    pub fn new(command_registry: CommandDispatcher) -> Self {
        Self {
            command_registry,
            hinter: HistoryHinter {},
        }
    }
}

impl Completer for ConsoleHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if line.starts_with('/') {
            let command_part = &line[1..pos];
            let matches: Vec<Pair> = self
                .command_registry
                .get_command_names()
                .into_iter()
                .filter(|cmd| cmd.starts_with(command_part))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd,
                })
                .collect();
            if !matches.is_empty() {
                return Ok((1, matches));
            }
        }
        Ok((pos, Vec::new()))
    }
}

impl Hinter for ConsoleHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ConsoleHelper {}
impl Validator for ConsoleHelper {}
impl Helper for ConsoleHelper {}

fn history_path() -> PathBuf {
    dirs::home_dir()
        .map(|mut path| {
            path.push(".netguardian/input_history.txt");
            path
        })
        .unwrap_or_else(|| Path::new(".netguardian/input_history.txt").to_path_buf())
}

/// Creates a configured rustyline editor
pub fn create_editor(
    command_registry: CommandDispatcher,
) -> Result<Editor<ConsoleHelper, FileHistory>, AgentError> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)
        .map_err(|e| AgentError::Input(format!("Failed to create line editor: {}", e)))?;
    editor.set_helper(Some(ConsoleHelper::new(command_registry)));
    let _ = editor.load_history(&history_path());

    Ok(editor)
}

/// Reads a line of input; None means the operator closed the session.
pub fn read_input(
    editor: &mut Editor<ConsoleHelper, FileHistory>,
) -> Result<Option<String>, AgentError> {
    let prompt = style("> ").bold().cyan().to_string();
    match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                if let Err(e) = editor.add_history_entry(&line) {
                    return Err(AgentError::Input(format!(
                        "Failed to add history entry: {}",
                        e
                    )));
                }
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(AgentError::Input(format!("Input error: {}", err))),
    }
}

/// Saves the editor history
pub fn save_history(editor: &mut Editor<ConsoleHelper, FileHistory>) -> Result<(), AgentError> {
    let path = history_path();
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    editor
        .save_history(&path)
        .map_err(|e| AgentError::Input(format!("Failed to save history: {}", e)))
}
