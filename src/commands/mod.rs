pub mod dispatcher;
pub mod handler;
pub mod registry;

use crate::config::ConnectionSettings;
use crate::fleet::NetworkSnapshot;
use crate::providers::ChatTurn;

/// Mutable console state shared with the slash-command handlers.
pub struct ChatState {
    pub history: Vec<ChatTurn>,
    pub settings: ConnectionSettings,
    pub snapshot: NetworkSnapshot,
    pub should_continue: bool,
}

impl ChatState {
    pub fn new(settings: ConnectionSettings, snapshot: NetworkSnapshot) -> Self {
        Self {
            history: Vec::new(),
            settings,
            snapshot,
            should_continue: true,
        }
    }
}
