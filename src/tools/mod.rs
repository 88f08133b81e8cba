//! Tool catalogue and dispatch for the agent loop.
//!
//! Each descriptor is both a wire-level contract (rendered verbatim into the
//! system instruction) and a dispatch-table key. Adding a tool means adding a
//! descriptor in `registry` and a handler in `dispatcher`; the registry test
//! keeps the two from diverging.

pub mod dispatcher;
pub mod registry;

use crate::fleet::{FleetControl, NetworkSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
        }
    }

    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

/// Borrowed view of the external data stores handed to each tool invocation.
pub struct ToolContext<'a> {
    pub snapshot: &'a NetworkSnapshot,
    pub control: &'a dyn FleetControl,
}
