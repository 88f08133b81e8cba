//! Static catalogue of the tools advertised to the remote model.

use super::{ParamKind, ParamSpec, ToolDescriptor};

const FIND_DEVICE: ToolDescriptor = ToolDescriptor {
    name: "find_device",
    description: "Locate a device by (partial) name, IP address substring, or exact id. Returns the first match as a compact record.",
    params: &[ParamSpec {
        name: "search_term",
        kind: ParamKind::String,
        required: true,
        description: "Name fragment, IP substring, or device id",
    }],
};

const EXECUTE_CLI_COMMAND: ToolDescriptor = ToolDescriptor {
    name: "execute_cli_command",
    description: "Run a literal vendor CLI command on a device and return the console transcript. The command must use the device vendor's syntax.",
    params: &[
        ParamSpec {
            name: "device_id",
            kind: ParamKind::String,
            required: true,
            description: "Exact device id, e.g. core-01",
        },
        ParamSpec {
            name: "command",
            kind: ParamKind::String,
            required: true,
            description: "The vendor CLI command to execute",
        },
    ],
};

const GET_DEVICE_LOGS: ToolDescriptor = ToolDescriptor {
    name: "get_device_logs",
    description: "Fetch the most relevant recent log entries for a device (at most 5).",
    params: &[ParamSpec {
        name: "device_name",
        kind: ParamKind::String,
        required: true,
        description: "Device name or name fragment",
    }],
};

const SCAN_SUBNET: ToolDescriptor = ToolDescriptor {
    name: "scan_subnet",
    description: "Report address utilization for a subnet by exact CIDR, e.g. 10.0.1.0/24.",
    params: &[ParamSpec {
        name: "cidr",
        kind: ParamKind::String,
        required: true,
        description: "CIDR block to scan",
    }],
};

const REBOOT_DEVICE: ToolDescriptor = ToolDescriptor {
    name: "reboot_device",
    description: "Send a reboot signal to a device. Side-effecting and audited; use only when the operator asked for a restart.",
    params: &[ParamSpec {
        name: "device_id",
        kind: ParamKind::String,
        required: true,
        description: "Exact device id to reboot",
    }],
};

const CHECK_VULNERABILITIES: ToolDescriptor = ToolDescriptor {
    name: "check_vulnerabilities",
    description: "List open vulnerabilities recorded for a device.",
    params: &[ParamSpec {
        name: "device_id",
        kind: ParamKind::String,
        required: true,
        description: "Exact device id",
    }],
};

const CATALOGUE: &[ToolDescriptor] = &[
    FIND_DEVICE,
    EXECUTE_CLI_COMMAND,
    GET_DEVICE_LOGS,
    SCAN_SUBNET,
    REBOOT_DEVICE,
    CHECK_VULNERABILITIES,
];

#[derive(Debug, Clone, Copy)]
pub struct ToolRegistry {
    descriptors: &'static [ToolDescriptor],
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            descriptors: CATALOGUE,
        }
    }

    pub fn descriptors(&self) -> &'static [ToolDescriptor] {
        self.descriptors
    }

    pub fn descriptor(&self, name: &str) -> Option<&'static ToolDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Render the catalogue block embedded in the system instruction.
    pub fn catalogue_text(&self) -> String {
        let mut text = String::from("You have access to the following tools:\n");
        for descriptor in self.descriptors {
            let params: Vec<String> = descriptor
                .params
                .iter()
                .map(|p| {
                    format!(
                        "{}: {}{}",
                        p.name,
                        p.kind.as_str(),
                        if p.required { " (required)" } else { " (optional)" }
                    )
                })
                .collect();
            text.push_str(&format!(
                "- {}({}): {}\n",
                descriptor.name,
                params.join(", "),
                descriptor.description
            ));
        }
        text
    }

    /// Strict schema check: every required parameter present with the right
    /// primitive type, and no undeclared parameters.
    pub fn validate_args(
        descriptor: &ToolDescriptor,
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> bool {
        for param in descriptor.params {
            match args.get(param.name) {
                Some(value) => {
                    if !param.kind.matches(value) {
                        return false;
                    }
                }
                None if param.required => return false,
                None => {}
            }
        }
        args.keys()
            .all(|key| descriptor.params.iter().any(|p| p.name == key))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalogue_names_every_tool_once() {
        let registry = ToolRegistry::new();
        let names: Vec<&str> = registry.descriptors().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "find_device",
                "execute_cli_command",
                "get_device_logs",
                "scan_subnet",
                "reboot_device",
                "check_vulnerabilities"
            ]
        );
        let text = registry.catalogue_text();
        for name in names {
            assert!(text.contains(name));
        }
    }

    #[test]
    fn validate_rejects_missing_required_and_wrong_type() {
        let registry = ToolRegistry::new();
        let descriptor = registry.descriptor("execute_cli_command").unwrap();

        let ok = json!({"device_id": "core-01", "command": "show version"});
        assert!(ToolRegistry::validate_args(descriptor, ok.as_object().unwrap()));

        let missing = json!({"device_id": "core-01"});
        assert!(!ToolRegistry::validate_args(descriptor, missing.as_object().unwrap()));

        let wrong_type = json!({"device_id": 7, "command": "show version"});
        assert!(!ToolRegistry::validate_args(descriptor, wrong_type.as_object().unwrap()));

        let undeclared = json!({"device_id": "core-01", "command": "x", "force": true});
        assert!(!ToolRegistry::validate_args(descriptor, undeclared.as_object().unwrap()));
    }
}
