//! Deterministic in-memory fleet for the console binary and tests.
//!
//! Gauges and uptimes derive from a stable hash of the device id, so repeated
//! runs (and repeated simulator calls) see identical resource values.

use super::{
    Device, DeviceClass, DeviceStatus, LinkState, LogEntry, LogLevel, NetworkInterface,
    NetworkSnapshot, Severity, Subnet, Vendor, VulnStatus, Vulnerability,
};
use chrono::{Duration, Utc};

fn stable_seed(id: &str) -> u64 {
    id.bytes().fold(0xcbf29ce484222325u64, |h, b| {
        (h ^ b as u64).wrapping_mul(0x100000001b3)
    })
}

fn interface_name(vendor: Vendor) -> &'static str {
    match vendor {
        Vendor::Cisco => "GigabitEthernet0/1",
        Vendor::Huawei => "GE1/0/1",
        Vendor::Juniper => "ge-0/0/0",
        Vendor::Arista => "Ethernet1",
        Vendor::MikroTik => "ether1",
        Vendor::Vmware => "vmnic0",
        Vendor::Linux => "eth0",
    }
}

fn os_for(vendor: Vendor, class: DeviceClass) -> &'static str {
    match (vendor, class) {
        (Vendor::Cisco, _) => "IOS XE 17.3",
        (Vendor::Huawei, _) => "VRP 8.1",
        (Vendor::Juniper, _) => "Junos OS 21.4R3",
        (Vendor::Arista, _) => "EOS 4.28.3M",
        (Vendor::MikroTik, _) => "RouterOS 7.12",
        (Vendor::Vmware, _) => "VMware ESXi 7.0",
        (Vendor::Linux, DeviceClass::Hypervisor) => "Proxmox VE 8.1",
        (Vendor::Linux, _) => "Debian 12",
    }
}

fn render_config(name: &str, vendor: Vendor, ip: &str, interfaces: &[NetworkInterface]) -> String {
    match vendor {
        Vendor::Cisco | Vendor::Arista => {
            let mut config = format!(
                "! {} Configuration\nversion 16.9\nservice timestamps log datetime msec\nhostname {}\n!\ninterface Vlan1\n ip address {} 255.255.255.0\n no shutdown\n!\n",
                vendor.as_str(),
                name,
                ip
            );
            for iface in interfaces {
                config.push_str(&format!(
                    "interface {}\n ip address {} 255.255.255.252\n no shutdown\n!\n",
                    iface.name, iface.ip
                ));
            }
            config.push_str("ip route 0.0.0.0 0.0.0.0 10.0.0.1\n!\nend");
            config
        }
        Vendor::Huawei => {
            let mut config = format!(
                "# Huawei VRP Software\nsysname {}\n#\nvlan 1\n#\ninterface Vlanif1\n ip address {} 255.255.255.0\n#\n",
                name, ip
            );
            for iface in interfaces {
                config.push_str(&format!(
                    "interface {}\n ip address {} 255.255.255.252\n undo shutdown\n#\n",
                    iface.name, iface.ip
                ));
            }
            config.push_str("ip route-static 0.0.0.0 0.0.0.0 10.0.0.1\nreturn");
            config
        }
        Vendor::Juniper => {
            let mut config = format!(
                "system {{\n  host-name {};\n  root-authentication {{\n    encrypted-password \"$6$redacted\";\n  }}\n}}\ninterfaces {{\n",
                name
            );
            for iface in interfaces {
                config.push_str(&format!(
                    "  {} {{\n    unit 0 {{\n      family inet {{\n        address {}/30;\n      }}\n    }}\n  }}\n",
                    iface.name, iface.ip
                ));
            }
            config.push_str(
                "}\nrouting-options {\n  static {\n    route 0.0.0.0/0 next-hop 10.0.0.1;\n  }\n}",
            );
            config
        }
        _ => format!(
            "# Generic config for {}\nhostname {}\ninterface eth0\n  address {}\n  netmask 255.255.255.0\n  gateway 10.0.0.1",
            name, name, ip
        ),
    }
}

fn build_device(
    id: &str,
    name: &str,
    class: DeviceClass,
    vendor: Vendor,
    ip: &str,
    with_config: bool,
) -> Device {
    let seed = stable_seed(id);
    let iface = NetworkInterface {
        name: interface_name(vendor).to_string(),
        mac: format!(
            "00:1A:2B:{:02X}:{:02X}:{:02X}",
            (seed >> 16) as u8,
            (seed >> 8) as u8,
            seed as u8
        ),
        ip: ip.to_string(),
        speed_mbps: 1000,
        state: LinkState::Up,
    };
    let interfaces = vec![iface];
    let config = with_config.then(|| render_config(name, vendor, ip, &interfaces));

    Device {
        id: id.to_string(),
        name: name.to_string(),
        class,
        vendor,
        ip: ip.to_string(),
        os: os_for(vendor, class).to_string(),
        status: DeviceStatus::Online,
        uptime_secs: 86_400 + seed % 900_000,
        cpu_usage: 10 + (seed % 60) as u8,
        mem_usage: 20 + (seed % 55) as u8,
        disk_usage: 20 + (seed % 50) as u8,
        interfaces,
        config,
    }
}

/// Three-tier topology with mixed vendors, mirroring a small campus network.
pub fn mock_snapshot() -> NetworkSnapshot {
    let mut devices = vec![
        build_device("core-01", "Core-Cisco", DeviceClass::Router, Vendor::Cisco, "10.0.1.1", true),
        build_device("core-02", "Core-Huawei", DeviceClass::Router, Vendor::Huawei, "10.0.1.2", true),
        build_device("dist-01", "Dist-Juniper-1", DeviceClass::Switch, Vendor::Juniper, "10.0.2.1", true),
        build_device("dist-02", "Dist-Arista-1", DeviceClass::Switch, Vendor::Arista, "10.0.2.2", true),
        build_device("edge-01", "Edge-MikroTik", DeviceClass::Router, Vendor::MikroTik, "10.0.3.1", true),
        build_device("host-01", "Host-ESXi-1", DeviceClass::Hypervisor, Vendor::Vmware, "10.0.4.1", true),
        build_device("host-02", "Host-Proxmox-1", DeviceClass::Host, Vendor::Linux, "10.0.4.2", false),
    ];
    for i in 1..=3u8 {
        devices.push(build_device(
            &format!("acc-0{}", i),
            &format!("Access-SW{}", i),
            DeviceClass::Switch,
            Vendor::Cisco,
            &format!("10.0.5.{}", i),
            i != 3,
        ));
    }
    devices[4].status = DeviceStatus::Warning;
    devices[6].status = DeviceStatus::Critical;

    let logs = mock_logs(&devices);
    let subnets = vec![
        Subnet {
            cidr: "10.0.1.0/24".to_string(),
            name: "Core Uplinks".to_string(),
            usage_percent: 62,
            total_ips: 254,
            used_ips: 157,
            location: "DC-1".to_string(),
        },
        Subnet {
            cidr: "10.0.5.0/24".to_string(),
            name: "Access Layer".to_string(),
            usage_percent: 41,
            total_ips: 254,
            used_ips: 104,
            location: "Campus-A".to_string(),
        },
        Subnet {
            cidr: "192.168.100.0/24".to_string(),
            name: "Guest Wi-Fi".to_string(),
            usage_percent: 88,
            total_ips: 254,
            used_ips: 223,
            location: "Campus-A".to_string(),
        },
    ];
    let vulnerabilities = vec![
        Vulnerability {
            id: "v1".to_string(),
            device_id: "core-01".to_string(),
            device_name: "Core-Cisco".to_string(),
            severity: Severity::Medium,
            description: "SNMP default community string (public)".to_string(),
            remediation: "Change the SNMP community string".to_string(),
            cve_id: Some("CVE-2023-2001".to_string()),
            status: VulnStatus::Open,
        },
        Vulnerability {
            id: "v2".to_string(),
            device_id: "dist-01".to_string(),
            device_name: "Dist-Juniper-1".to_string(),
            severity: Severity::High,
            description: "J-Web remote code execution".to_string(),
            remediation: "Update Junos OS to 21.4R3 or later".to_string(),
            cve_id: Some("CVE-2023-36844".to_string()),
            status: VulnStatus::Open,
        },
        Vulnerability {
            id: "v3".to_string(),
            device_id: "acc-01".to_string(),
            device_name: "Access-SW1".to_string(),
            severity: Severity::Low,
            description: "Port security disabled on access ports".to_string(),
            remediation: "Enable port-security on access ports".to_string(),
            cve_id: None,
            status: VulnStatus::Open,
        },
        Vulnerability {
            id: "v4".to_string(),
            device_id: "core-02".to_string(),
            device_name: "Core-Huawei".to_string(),
            severity: Severity::Medium,
            description: "SSH service denial of service".to_string(),
            remediation: "Apply vendor patch for CVE-2022-2231".to_string(),
            cve_id: Some("CVE-2022-2231".to_string()),
            status: VulnStatus::Fixed,
        },
    ];

    NetworkSnapshot {
        devices,
        logs,
        subnets,
        vulnerabilities,
    }
}

fn mock_logs(devices: &[Device]) -> Vec<LogEntry> {
    let events: [(&str, LogLevel, &str); 4] = [
        (
            "%LINK-3-UPDOWN: Interface GigabitEthernet0/1, changed state to down",
            LogLevel::Error,
            "<187>",
        ),
        (
            "%SYS-5-CONFIG_I: Configured from console by admin",
            LogLevel::Info,
            "<189>",
        ),
        (
            "%SEC-4-LOGIN_FAILED: Login failed from 192.168.1.50",
            LogLevel::Warn,
            "<188>",
        ),
        (
            "sshd[1234]: Failed password for root from 10.0.0.5 port 22 ssh2",
            LogLevel::Warn,
            "<86>",
        ),
    ];

    let now = Utc::now();
    let mut logs = Vec::new();
    for (i, device) in devices.iter().enumerate() {
        for (j, (msg, level, pri)) in events.iter().enumerate() {
            if (stable_seed(&device.id) >> j) & 1 == 0 {
                continue;
            }
            let timestamp = now - Duration::minutes((i * 7 + j * 3) as i64 + 5);
            logs.push(LogEntry {
                timestamp,
                level: *level,
                message: msg.to_string(),
                device: device.name.clone(),
                raw_syslog: format!("{}{} {} {}", pri, timestamp.to_rfc3339(), device.name, msg),
            });
        }
    }
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    logs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_deterministic() {
        let a = mock_snapshot();
        let b = mock_snapshot();
        assert_eq!(a.devices.len(), b.devices.len());
        for (x, y) in a.devices.iter().zip(&b.devices) {
            assert_eq!(x.uptime_secs, y.uptime_secs);
            assert_eq!(x.cpu_usage, y.cpu_usage);
        }
    }

    #[test]
    fn covers_all_dialect_vendors() {
        let snapshot = mock_snapshot();
        for vendor in [
            Vendor::Cisco,
            Vendor::Huawei,
            Vendor::Juniper,
            Vendor::Arista,
            Vendor::MikroTik,
        ] {
            assert!(
                snapshot.devices.iter().any(|d| d.vendor == vendor),
                "no {} device in mock fleet",
                vendor.as_str()
            );
        }
    }

    #[test]
    fn one_device_has_no_config() {
        let snapshot = mock_snapshot();
        assert!(snapshot.devices.iter().any(|d| d.config.is_none()));
    }
}
