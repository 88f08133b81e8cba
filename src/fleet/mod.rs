//! Read-only inventory model shared by the tool layer.
//!
//! The snapshot is owned by the caller and passed by reference into each
//! `send_message` invocation. The only mutation path is [`FleetControl`],
//! whose implementations serialize concurrent writes.

pub mod mock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    Cisco,
    Huawei,
    Juniper,
    Arista,
    MikroTik,
    Vmware,
    Linux,
}

impl Vendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Cisco => "Cisco",
            Vendor::Huawei => "Huawei",
            Vendor::Juniper => "Juniper",
            Vendor::Arista => "Arista",
            Vendor::MikroTik => "MikroTik",
            Vendor::Vmware => "VMware",
            Vendor::Linux => "Linux",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    Router,
    Switch,
    Firewall,
    Hypervisor,
    Host,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    Online,
    Offline,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkState {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub name: String,
    pub mac: String,
    pub ip: String,
    pub speed_mbps: u32,
    pub state: LinkState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub class: DeviceClass,
    pub vendor: Vendor,
    pub ip: String,
    pub os: String,
    pub status: DeviceStatus,
    pub uptime_secs: u64,
    pub cpu_usage: u8,
    pub mem_usage: u8,
    pub disk_usage: u8,
    pub interfaces: Vec<NetworkInterface>,
    pub config: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Device tag, matched case-insensitively by the log tool
    pub device: String,
    pub raw_syslog: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subnet {
    pub cidr: String,
    pub name: String,
    pub usage_percent: u8,
    pub total_ips: u32,
    pub used_ips: u32,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VulnStatus {
    Open,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vulnerability {
    pub id: String,
    pub device_id: String,
    pub device_name: String,
    pub severity: Severity,
    pub description: String,
    pub remediation: String,
    pub cve_id: Option<String>,
    pub status: VulnStatus,
}

/// Read-only bundle of the external data stores.
#[derive(Debug, Clone, Default)]
pub struct NetworkSnapshot {
    pub devices: Vec<Device>,
    pub logs: Vec<LogEntry>,
    pub subnets: Vec<Subnet>,
    pub vulnerabilities: Vec<Vulnerability>,
}

impl NetworkSnapshot {
    pub fn device_by_id(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }
}

/// One audited side effect (CLI execution or reboot signal).
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub device_id: String,
    pub action: String,
}

impl AuditEntry {
    pub fn now(device_id: &str, action: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            device_id: device_id.to_string(),
            action: action.into(),
        }
    }
}

/// Single mutation entry point for the otherwise read-only fleet.
pub trait FleetControl: Send + Sync {
    fn record_audit(&self, entry: AuditEntry);

    /// Flip a device between online and offline. Returns false for an unknown id.
    fn toggle_status(&self, device_id: &str) -> bool;
}

/// Mutex-backed [`FleetControl`] used by the console binary and tests.
pub struct InMemoryFleetControl {
    known_ids: HashSet<String>,
    audit: Mutex<Vec<AuditEntry>>,
    toggled: Mutex<Vec<String>>,
}

impl InMemoryFleetControl {
    pub fn new(snapshot: &NetworkSnapshot) -> Self {
        Self {
            known_ids: snapshot.devices.iter().map(|d| d.id.clone()).collect(),
            audit: Mutex::new(Vec::new()),
            toggled: Mutex::new(Vec::new()),
        }
    }

    pub fn audit_log(&self) -> Vec<AuditEntry> {
        self.audit.lock().expect("audit lock poisoned").clone()
    }

    /// Ids that received a reboot signal, in order.
    pub fn toggles(&self) -> Vec<String> {
        self.toggled.lock().expect("toggle lock poisoned").clone()
    }
}

impl FleetControl for InMemoryFleetControl {
    fn record_audit(&self, entry: AuditEntry) {
        self.audit.lock().expect("audit lock poisoned").push(entry);
    }

    fn toggle_status(&self, device_id: &str) -> bool {
        if !self.known_ids.contains(device_id) {
            return false;
        }
        self.toggled
            .lock()
            .expect("toggle lock poisoned")
            .push(device_id.to_string());
        true
    }
}
