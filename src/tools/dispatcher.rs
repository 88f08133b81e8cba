//! String-keyed tool dispatch.
//!
//! Business-logic misses (unknown device, unknown subnet) come back as
//! descriptive strings for the model to relay; only an unrecognized tool name
//! is an error, and the loop converts that into a recoverable observation.

use super::ToolContext;
use crate::core::error::AgentError;
use crate::fleet::{AuditEntry, Device, NetworkSnapshot, VulnStatus};
use crate::simulator;
use serde_json::{Map, Value, json};
use std::collections::HashMap;

type ToolHandler = fn(&Map<String, Value>, &ToolContext) -> String;

pub struct ToolDispatcher {
    handlers: HashMap<&'static str, ToolHandler>,
}

impl ToolDispatcher {
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, ToolHandler> = HashMap::new();
        handlers.insert("find_device", find_device);
        handlers.insert("execute_cli_command", execute_cli_command);
        handlers.insert("get_device_logs", get_device_logs);
        handlers.insert("scan_subnet", scan_subnet);
        handlers.insert("reboot_device", reboot_device);
        handlers.insert("check_vulnerabilities", check_vulnerabilities);
        Self { handlers }
    }

    pub fn execute(
        &self,
        name: &str,
        args: &Map<String, Value>,
        context: &ToolContext,
    ) -> Result<String, AgentError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| AgentError::InvalidTool(name.to_string()))?;
        Ok(handler(args, context))
    }
}

impl Default for ToolDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn arg_str<'a>(args: &'a Map<String, Value>, key: &str) -> &'a str {
    args.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Fuzzy device lookup: exact id, then name substring, then IP substring,
/// then a relaxed alphanumeric pass for inputs like "core cisco".
fn fuzzy_find<'a>(snapshot: &'a NetworkSnapshot, term: &str) -> Option<&'a Device> {
    let search = term.trim().to_lowercase();
    if search.is_empty() {
        return None;
    }
    if let Some(found) = snapshot.devices.iter().find(|d| d.id == search) {
        return Some(found);
    }
    if let Some(found) = snapshot
        .devices
        .iter()
        .find(|d| d.name.to_lowercase().contains(&search))
    {
        return Some(found);
    }
    if let Some(found) = snapshot.devices.iter().find(|d| d.ip.contains(&search)) {
        return Some(found);
    }
    let relaxed: String = search.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    snapshot.devices.iter().find(|d| {
        d.name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .contains(&relaxed)
    })
}

fn compact_record(device: &Device) -> Value {
    json!({
        "id": device.id,
        "name": device.name,
        "vendor": device.vendor.as_str(),
        "class": device.class,
        "ip": device.ip,
        "os": device.os,
        "status": device.status,
        "cpu_usage": device.cpu_usage,
        "mem_usage": device.mem_usage,
    })
}

fn find_device(args: &Map<String, Value>, context: &ToolContext) -> String {
    let term = arg_str(args, "search_term");
    match fuzzy_find(context.snapshot, term) {
        Some(device) => compact_record(device).to_string(),
        None => format!("No device matching '{}' was found.", term),
    }
}

fn execute_cli_command(args: &Map<String, Value>, context: &ToolContext) -> String {
    let device_id = arg_str(args, "device_id");
    let command = arg_str(args, "command");
    match context.snapshot.device_by_id(device_id) {
        Some(device) => {
            context
                .control
                .record_audit(AuditEntry::now(device_id, format!("cli: {}", command)));
            simulator::simulate(device, command)
        }
        None => format!("Device with id '{}' not found.", device_id),
    }
}

fn get_device_logs(args: &Map<String, Value>, context: &ToolContext) -> String {
    let name = arg_str(args, "device_name").to_lowercase();
    let entries: Vec<String> = context
        .snapshot
        .logs
        .iter()
        .filter(|log| log.device.to_lowercase().contains(&name))
        .take(5)
        .map(|log| {
            format!(
                "[{:?}] {} {} - {}",
                log.level,
                log.timestamp.format("%Y-%m-%d %H:%M:%S"),
                log.device,
                log.message
            )
        })
        .collect();
    if entries.is_empty() {
        format!("No recent logs for '{}'.", arg_str(args, "device_name"))
    } else {
        entries.join("\n")
    }
}

fn scan_subnet(args: &Map<String, Value>, context: &ToolContext) -> String {
    let cidr = arg_str(args, "cidr");
    match context.snapshot.subnets.iter().find(|s| s.cidr == cidr) {
        Some(subnet) => format!(
            "Subnet {} ({}): {}% utilized, {} of {} addresses in use.",
            subnet.cidr, subnet.name, subnet.usage_percent, subnet.used_ips, subnet.total_ips
        ),
        None => format!("No utilization record for subnet '{}'.", cidr),
    }
}

fn reboot_device(args: &Map<String, Value>, context: &ToolContext) -> String {
    let device_id = arg_str(args, "device_id");
    match context.snapshot.device_by_id(device_id) {
        Some(device) => {
            context
                .control
                .record_audit(AuditEntry::now(device_id, "reboot signal"));
            context.control.toggle_status(device_id);
            format!("Reboot signal sent to {}.", device.name)
        }
        None => format!("Device with id '{}' not found.", device_id),
    }
}

fn check_vulnerabilities(args: &Map<String, Value>, context: &ToolContext) -> String {
    let device_id = arg_str(args, "device_id");
    let open: Vec<String> = context
        .snapshot
        .vulnerabilities
        .iter()
        .filter(|v| v.device_id == device_id && v.status == VulnStatus::Open)
        .map(|v| {
            let cve = v.cve_id.as_deref().unwrap_or("no CVE");
            format!(
                "{:?} ({}): {} Remediation: {}",
                v.severity, cve, v.description, v.remediation
            )
        })
        .collect();
    if open.is_empty() {
        "No open vulnerabilities found.".to_string()
    } else {
        open.join("\n")
    }
}
