//! Multi-vendor CLI transcript simulation.
//!
//! `simulate` is pure: the same device record and command text always render
//! the same transcript. Numeric fields (uptime, round-trip times, ARP ages)
//! derive from the device's own gauges rather than fresh randomness, so the
//! output is idempotent and testable.

use crate::fleet::{Device, DeviceStatus, LinkState, Vendor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Ios,
    Eos,
    Vrp,
    Junos,
    RouterOs,
    Shell,
}

fn dialect_for(vendor: Vendor) -> Dialect {
    match vendor {
        Vendor::Cisco => Dialect::Ios,
        Vendor::Arista => Dialect::Eos,
        Vendor::Huawei => Dialect::Vrp,
        Vendor::Juniper => Dialect::Junos,
        Vendor::MikroTik => Dialect::RouterOs,
        Vendor::Vmware | Vendor::Linux => Dialect::Shell,
    }
}

fn prompt(device: &Device) -> String {
    match dialect_for(device.vendor) {
        Dialect::Ios => format!("{}#", device.name),
        Dialect::Eos => format!("{}>", device.name),
        Dialect::Vrp => format!("<{}>", device.name),
        Dialect::Junos => format!("admin@{}>", device.name),
        Dialect::RouterOs => format!("[admin@{}] >", device.name),
        Dialect::Shell => format!("root@{}:~#", device.name.to_lowercase()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandFamily {
    Version,
    ConfigDump,
    InterfaceStatus,
    Neighbors,
    VlanList,
    Ping,
    Unknown,
}

/// Case-insensitive substring classification, checked in priority order.
fn classify(command: &str) -> CommandFamily {
    let text = command.to_lowercase();
    if text.contains("version") {
        CommandFamily::Version
    } else if text.contains("config") {
        CommandFamily::ConfigDump
    } else if text.contains("interface") {
        CommandFamily::InterfaceStatus
    } else if text.contains("arp") || text.contains("neighbor") {
        CommandFamily::Neighbors
    } else if text.contains("vlan") {
        CommandFamily::VlanList
    } else if text.contains("ping") {
        CommandFamily::Ping
    } else {
        CommandFamily::Unknown
    }
}

/// Render a vendor-accurate transcript for `command` run on `device`.
///
/// Always begins with `<prompt> <command>` and ends by re-emitting the
/// prompt. Unrecognized commands are not an error: they render the vendor's
/// own invalid-command output.
pub fn simulate(device: &Device, command: &str) -> String {
    let prompt = prompt(device);
    let body = match classify(command) {
        CommandFamily::Version => render_version(device),
        CommandFamily::ConfigDump => render_config_dump(device),
        CommandFamily::InterfaceStatus => render_interfaces(device),
        CommandFamily::Neighbors => render_neighbors(device),
        CommandFamily::VlanList => render_vlans(device),
        CommandFamily::Ping => render_ping(device, command),
        CommandFamily::Unknown => render_invalid(device, command),
    };
    format!("{} {}\n{}\n{}", prompt, command.trim(), body.trim_end(), prompt)
}

fn format_uptime(secs: u64) -> String {
    let weeks = secs / 604_800;
    let days = (secs % 604_800) / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if weeks > 0 {
        format!("{} weeks, {} days, {} hours, {} minutes", weeks, days, hours, minutes)
    } else {
        format!("{} days, {} hours, {} minutes", days, hours, minutes)
    }
}

fn render_version(device: &Device) -> String {
    let uptime = format_uptime(device.uptime_secs);
    match dialect_for(device.vendor) {
        Dialect::Ios => format!(
            "Cisco IOS XE Software, Version {}\nCopyright (c) 1986-2023 by Cisco Systems, Inc.\n\n{} uptime is {}\nSystem image file is \"bootflash:packages.conf\"\ncisco C9300-24T ({}% CPU load)",
            device.os, device.name, uptime, device.cpu_usage
        ),
        Dialect::Eos => format!(
            "Arista DCS-7050SX-64\nHardware version: 01.01\nSoftware image version: {}\n\nHostname: {}\nUptime: {}\nTotal memory utilization: {}%",
            device.os, device.name, uptime, device.mem_usage
        ),
        Dialect::Vrp => format!(
            "Huawei Versatile Routing Platform Software\nVRP (R) software, Version {}\nCopyright (C) 2012-2023 Huawei Technologies Co., Ltd.\nHUAWEI {} uptime is {}",
            device.os, device.name, uptime
        ),
        Dialect::Junos => format!(
            "Hostname: {}\nModel: mx480\nJunos: {}\nJUNOS OS Kernel 64-bit\nSystem booted: {} ago",
            device.name, device.os, uptime
        ),
        Dialect::RouterOs => format!(
            "  uptime: {}\n  version: {}\n  cpu-load: {}%\n  board-name: {}",
            uptime, device.os, device.cpu_usage, device.name
        ),
        Dialect::Shell => format!(
            "{}\nHostname: {}\nKernel: 5.15.0-generic\nUp {}",
            device.os, device.name, uptime
        ),
    }
}

fn render_config_dump(device: &Device) -> String {
    match &device.config {
        Some(config) => match dialect_for(device.vendor) {
            Dialect::Ios | Dialect::Eos => format!(
                "Building configuration...\n\nCurrent configuration : {} bytes\n{}",
                config.len(),
                config
            ),
            _ => config.clone(),
        },
        None => match dialect_for(device.vendor) {
            Dialect::Ios | Dialect::Eos => "% Startup configuration is not present".to_string(),
            Dialect::Vrp => "Info: The configuration is empty.".to_string(),
            Dialect::Junos => "## No configuration committed on this device".to_string(),
            Dialect::RouterOs => "# no configuration exported".to_string(),
            Dialect::Shell => "cat: /etc/config: No such file or directory".to_string(),
        },
    }
}

fn render_interfaces(device: &Device) -> String {
    match dialect_for(device.vendor) {
        Dialect::Ios => {
            let mut out = String::from(
                "Interface              IP-Address      OK? Method Status                Protocol",
            );
            for iface in &device.interfaces {
                let status = if iface.state == LinkState::Up { "up" } else { "administratively down" };
                out.push_str(&format!(
                    "\n{:<22} {:<15} YES manual {:<21} {}",
                    iface.name, iface.ip, status, if iface.state == LinkState::Up { "up" } else { "down" }
                ));
            }
            out
        }
        Dialect::Eos => {
            let mut out =
                String::from("Port        Name    Status       Vlan     Duplex  Speed   Type");
            for iface in &device.interfaces {
                let status = if iface.state == LinkState::Up { "connected" } else { "notconnect" };
                out.push_str(&format!(
                    "\n{:<11} --      {:<12} 1        full    {}M   1000BASE-T",
                    iface.name, status, iface.speed_mbps
                ));
            }
            out
        }
        Dialect::Vrp => {
            let mut out = String::from(
                "Interface                 IP Address/Mask      Physical   Protocol",
            );
            for iface in &device.interfaces {
                let phys = if iface.state == LinkState::Up { "up" } else { "down" };
                out.push_str(&format!(
                    "\n{:<25} {:<20} {:<10} {}",
                    iface.name,
                    format!("{}/30", iface.ip),
                    phys,
                    phys
                ));
            }
            out
        }
        Dialect::Junos => {
            let mut out =
                String::from("Interface               Admin Link Proto    Local");
            for iface in &device.interfaces {
                let link = if iface.state == LinkState::Up { "up" } else { "down" };
                out.push_str(&format!(
                    "\n{:<23} up    {:<4} inet     {}/30",
                    iface.name, link, iface.ip
                ));
            }
            out
        }
        Dialect::RouterOs => {
            let mut out = String::from("Flags: R - RUNNING\nColumns: NAME, TYPE, MTU");
            for (i, iface) in device.interfaces.iter().enumerate() {
                let flag = if iface.state == LinkState::Up { "R" } else { " " };
                out.push_str(&format!("\n{} {}  {:<8} ether  1500", i, flag, iface.name));
            }
            out
        }
        Dialect::Shell => {
            let mut out = String::new();
            for iface in &device.interfaces {
                let state = if iface.state == LinkState::Up { "UP" } else { "DOWN" };
                out.push_str(&format!("{:<16} {:<14} {}/24\n", iface.name, state, iface.ip));
            }
            out.trim_end().to_string()
        }
    }
}

fn render_neighbors(device: &Device) -> String {
    // The upstream gateway is the only neighbor the mock fabric exposes.
    let gateway = gateway_of(&device.ip);
    let age = device.uptime_secs % 240;
    let iface = device
        .interfaces
        .first()
        .map(|i| i.name.as_str())
        .unwrap_or("eth0");
    match dialect_for(device.vendor) {
        Dialect::Ios => format!(
            "Protocol  Address          Age (min)  Hardware Addr   Type   Interface\nInternet  {:<15} {:>9}   001a.2b3c.4d5e  ARPA   {}",
            gateway,
            age / 60,
            iface
        ),
        Dialect::Eos => format!(
            "Address         Age (sec)  Hardware Addr    Interface\n{:<15} {:>9}  001a.2b3c.4d5e   {}",
            gateway, age, iface
        ),
        Dialect::Vrp => format!(
            "IP ADDRESS      MAC ADDRESS     EXPIRE(M) TYPE        INTERFACE\n{:<15} 001a-2b3c-4d5e  {:<9} D-0         {}",
            gateway,
            age / 60,
            iface
        ),
        Dialect::Junos => format!(
            "MAC Address       Address         Interface\n00:1a:2b:3c:4d:5e {:<15} {}.0",
            gateway, iface
        ),
        Dialect::RouterOs => format!(
            "Columns: ADDRESS, MAC-ADDRESS, INTERFACE\n0 {:<15} 00:1A:2B:3C:4D:5E {}",
            gateway, iface
        ),
        Dialect::Shell => format!(
            "? ({}) at 00:1a:2b:3c:4d:5e [ether] on {}",
            gateway, iface
        ),
    }
}

fn render_vlans(device: &Device) -> String {
    let port = device
        .interfaces
        .first()
        .map(|i| i.name.as_str())
        .unwrap_or("eth0");
    match dialect_for(device.vendor) {
        Dialect::Ios | Dialect::Eos => format!(
            "VLAN Name                             Status    Ports\n---- -------------------------------- --------- ----------\n1    default                          active    {}\n10   management                       active\n20   users                            active",
            port
        ),
        Dialect::Vrp => format!(
            "The total number of vlans is : 3\nVID  Type     Ports\n1    common   UT:{}(U)\n10   common\n20   common",
            port
        ),
        Dialect::Junos => format!(
            "Routing instance    VLAN name    Tag    Interfaces\ndefault-switch      default      1      {}.0\ndefault-switch      mgmt         10\ndefault-switch      users        20",
            port
        ),
        Dialect::RouterOs => format!(
            "Columns: NAME, VLAN-ID, INTERFACE\n0 vlan1   1  {}\n1 vlan10 10  {}",
            port, port
        ),
        Dialect::Shell => format!("port\tvlan-id\n{}\t1 PVID Egress Untagged", port),
    }
}

fn gateway_of(ip: &str) -> String {
    match ip.rsplit_once('.') {
        Some((net, _)) => format!("{}.254", net),
        None => "10.0.0.254".to_string(),
    }
}

fn ping_target(command: &str) -> &str {
    command
        .split_whitespace()
        .rev()
        .find(|token| !token.eq_ignore_ascii_case("ping"))
        .unwrap_or("0.0.0.0")
}

fn render_ping(device: &Device, command: &str) -> String {
    let target = ping_target(command);
    let unreachable = device.status == DeviceStatus::Offline;
    let rtt = 1 + device.uptime_secs % 3;
    match dialect_for(device.vendor) {
        Dialect::Ios | Dialect::Eos => {
            if unreachable {
                format!(
                    "Type escape sequence to abort.\nSending 5, 100-byte ICMP Echos to {}, timeout is 2 seconds:\n.....\nSuccess rate is 0 percent (0/5)",
                    target
                )
            } else {
                format!(
                    "Type escape sequence to abort.\nSending 5, 100-byte ICMP Echos to {}, timeout is 2 seconds:\n!!!!!\nSuccess rate is 100 percent (5/5), round-trip min/avg/max = {}/{}/{} ms",
                    target,
                    rtt,
                    rtt + 1,
                    rtt + 3
                )
            }
        }
        Dialect::Vrp => {
            if unreachable {
                format!(
                    "PING {}: 56 data bytes, press CTRL_C to break\nRequest time out\n--- {} ping statistics ---\n5 packet(s) transmitted\n0 packet(s) received\n100.00% packet loss",
                    target, target
                )
            } else {
                format!(
                    "PING {}: 56 data bytes, press CTRL_C to break\nReply from {}: bytes=56 Sequence=1 ttl=255 time={} ms\n--- {} ping statistics ---\n5 packet(s) transmitted\n5 packet(s) received\n0.00% packet loss",
                    target, target, rtt, target
                )
            }
        }
        Dialect::RouterOs => {
            if unreachable {
                format!(
                    "SEQ HOST       SIZE TTL TIME  STATUS\n  0 {}            timeout\nsent=5 received=0 packet-loss=100%",
                    target
                )
            } else {
                format!(
                    "SEQ HOST       SIZE TTL TIME  STATUS\n  0 {}  56  64  {}ms\nsent=5 received=5 packet-loss=0%",
                    target, rtt
                )
            }
        }
        Dialect::Junos | Dialect::Shell => {
            if unreachable {
                format!(
                    "PING {} ({}): 56 data bytes\n--- {} ping statistics ---\n5 packets transmitted, 0 packets received, 100% packet loss",
                    target, target, target
                )
            } else {
                format!(
                    "PING {} ({}): 56 data bytes\n64 bytes from {}: icmp_seq=0 ttl=64 time={}.1 ms\n--- {} ping statistics ---\n5 packets transmitted, 5 packets received, 0% packet loss",
                    target, target, target, rtt, target
                )
            }
        }
    }
}

fn render_invalid(device: &Device, command: &str) -> String {
    let first = command.split_whitespace().next().unwrap_or("");
    match dialect_for(device.vendor) {
        Dialect::Ios => "% Invalid input detected at '^' marker.".to_string(),
        Dialect::Eos => "% Invalid input".to_string(),
        Dialect::Vrp => "Error: Unrecognized command found at '^' position.".to_string(),
        Dialect::Junos => "syntax error, expecting <command>.".to_string(),
        Dialect::RouterOs => format!("bad command name {} (line 1 column 1)", first),
        Dialect::Shell => format!("-bash: {}: command not found", first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::mock::mock_snapshot;

    fn device(vendor: Vendor) -> Device {
        mock_snapshot()
            .devices
            .into_iter()
            .find(|d| d.vendor == vendor)
            .expect("vendor present in mock fleet")
    }

    #[test]
    fn version_transcript_keeps_vendor_prompt_convention() {
        let cases = [
            (Vendor::Cisco, "show version"),
            (Vendor::Arista, "show version"),
            (Vendor::Huawei, "display version"),
            (Vendor::Juniper, "show version"),
            (Vendor::MikroTik, "/system resource print version"),
            (Vendor::Linux, "uname --version"),
        ];
        for (vendor, command) in cases {
            let dev = device(vendor);
            let transcript = simulate(&dev, command);
            let prompt = prompt(&dev);
            assert!(
                transcript.starts_with(&format!("{} {}", prompt, command)),
                "{:?}: transcript does not echo the command after the prompt",
                vendor
            );
            assert!(transcript.ends_with(&prompt), "{:?}: missing trailing prompt", vendor);
            assert!(transcript.contains(&dev.name), "{:?}: device name absent", vendor);
        }
    }

    #[test]
    fn prompts_are_distinguishable_across_dialects() {
        let prompts: Vec<String> = [
            Vendor::Cisco,
            Vendor::Arista,
            Vendor::Huawei,
            Vendor::Juniper,
            Vendor::MikroTik,
        ]
        .iter()
        .map(|v| {
            let mut dev = device(*v);
            dev.name = "Node".to_string();
            prompt(&dev)
        })
        .collect();
        for (i, a) in prompts.iter().enumerate() {
            for b in &prompts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn config_dump_without_stored_config_renders_placeholder() {
        let mut dev = device(Vendor::Cisco);
        dev.config = None;
        let transcript = simulate(&dev, "show running-config");
        assert!(transcript.contains("% Startup configuration is not present"));
        assert!(!transcript.trim().is_empty());
    }

    #[test]
    fn config_dump_with_stored_config_includes_blob() {
        let dev = device(Vendor::Huawei);
        let transcript = simulate(&dev, "display current-configuration");
        assert!(transcript.contains("sysname Core-Huawei"));
    }

    #[test]
    fn unknown_command_yields_vendor_error_and_is_idempotent() {
        let expectations = [
            (Vendor::Cisco, "% Invalid input detected at '^' marker."),
            (Vendor::Arista, "% Invalid input"),
            (Vendor::Huawei, "Error: Unrecognized command found at '^' position."),
            (Vendor::Juniper, "syntax error, expecting <command>."),
        ];
        for (vendor, error_line) in expectations {
            let dev = device(vendor);
            let first = simulate(&dev, "frobnicate hard");
            let second = simulate(&dev, "frobnicate hard");
            assert!(first.contains(error_line), "{:?}", vendor);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn family_priority_prefers_version_over_config() {
        assert_eq!(classify("show version"), CommandFamily::Version);
        assert_eq!(classify("show running-config"), CommandFamily::ConfigDump);
        assert_eq!(classify("display ip interface brief"), CommandFamily::InterfaceStatus);
        assert_eq!(classify("show arp"), CommandFamily::Neighbors);
        assert_eq!(classify("show vlan brief"), CommandFamily::VlanList);
        assert_eq!(classify("ping 10.0.0.1"), CommandFamily::Ping);
        assert_eq!(classify("reload in 5"), CommandFamily::Unknown);
    }

    #[test]
    fn ping_reports_loss_for_offline_device() {
        let mut dev = device(Vendor::Cisco);
        dev.status = DeviceStatus::Offline;
        let transcript = simulate(&dev, "ping 10.0.0.254");
        assert!(transcript.contains("Success rate is 0 percent"));
    }

    #[test]
    fn interface_table_layouts_differ_between_cisco_and_huawei() {
        let cisco = simulate(&device(Vendor::Cisco), "show ip interface brief");
        let huawei = simulate(&device(Vendor::Huawei), "display ip interface brief");
        assert!(cisco.contains("OK? Method Status"));
        assert!(huawei.contains("Physical   Protocol"));
    }
}
