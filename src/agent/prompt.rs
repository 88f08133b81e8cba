//! System-instruction assembly for the agent loop.

use crate::fleet::NetworkSnapshot;
use crate::lang::Language;
use crate::tools::registry::ToolRegistry;

/// Compose the instruction sent with every model call: the device context,
/// the tool catalogue, the call-envelope format, the workflow contract, and
/// the operator's language.
pub fn system_instruction(
    registry: &ToolRegistry,
    snapshot: &NetworkSnapshot,
    language: Language,
) -> String {
    let device_context: Vec<String> = snapshot
        .devices
        .iter()
        .map(|d| format!("{} ({}) ID: {}", d.name, d.vendor.as_str(), d.id))
        .collect();

    format!(
        "You are NetGuardian, a Network Operations Center (NOC) expert agent.\n\n\
         CURRENT CONTEXT - AVAILABLE DEVICES:\n[{}]\n\n\
         {}\n\
         To use a tool, reply with a single JSON object and nothing else:\n\
         {{\"tool\": \"tool_name\", \"args\": {{\"param\": \"value\"}}}}\n\
         Emit at most one tool call per reply. Tool results arrive as turns \
         prefixed TOOL_OUTPUT:. When no tool is needed, reply with the final \
         answer as plain text.\n\n\
         WORKFLOW:\n\
         1. Analyze the operator's intent.\n\
         2. Map device descriptions to the IDs listed above; use find_device when the target is unclear.\n\
         3. Translate the request into the literal CLI command for the device's vendor.\n\
         4. Invoke execute_cli_command with that exact command.\n\
         5. Report the raw result to the operator.\n\n\
         Reply in {} - the language of the operator's request.",
        device_context.join(", "),
        registry.catalogue_text(),
        language.name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::mock::mock_snapshot;

    #[test]
    fn instruction_embeds_catalogue_devices_and_language() {
        let snapshot = mock_snapshot();
        let text = system_instruction(&ToolRegistry::new(), &snapshot, Language::Cn);
        assert!(text.contains("Core-Cisco (Cisco) ID: core-01"));
        assert!(text.contains("execute_cli_command"));
        assert!(text.contains("Reply in Chinese"));
        assert!(text.contains("\"tool\""));
    }
}
