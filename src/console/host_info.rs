//! Host facts shown by the `ip` and `monitor` actions.
//!
//! Every lookup degrades to `None` instead of failing; renderers print an
//! "unavailable" placeholder for missing items.

use super::output::OutputLine;
use std::collections::BTreeSet;
use std::net::{IpAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;
use sysinfo::{Networks, System};

const PUBLIC_IP_URL: &str = "https://api.ipify.org";
const PUBLIC_IP_TIMEOUT: Duration = Duration::from_secs(5);
const UNAVAILABLE: &str = "unavailable";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkReport {
    pub hostname: Option<String>,
    pub local_ips: Vec<IpAddr>,
    pub routed_ip: Option<IpAddr>,
    pub mac_address: Option<String>,
    pub public_ip: Option<String>,
}

impl NetworkReport {
    pub fn collect() -> Self {
        Self::collect_with(lookup_public_ip)
    }

    pub fn collect_with(public_ip: impl FnOnce() -> Option<String>) -> Self {
        let hostname = System::host_name();
        let local_ips = hostname.as_deref().map(resolve_local_ips).unwrap_or_default();
        Self {
            hostname,
            local_ips,
            routed_ip: routed_ip(),
            mac_address: first_mac_address(),
            public_ip: public_ip(),
        }
    }

    pub fn lines(&self) -> Vec<OutputLine> {
        let rule = "=".repeat(60);
        let mut lines = vec![
            OutputLine::network("NETWORK INFORMATION"),
            OutputLine::network(rule.clone()),
            OutputLine::network(format!(
                "Host name: {}",
                self.hostname.as_deref().unwrap_or(UNAVAILABLE)
            )),
            OutputLine::network(""),
            OutputLine::network("Local IP addresses:"),
        ];
        for ip in &self.local_ips {
            lines.push(OutputLine::network(format!("  * {ip}")));
        }
        match self.routed_ip {
            Some(ip) => lines.push(OutputLine::network(format!("  * {ip} (default route)"))),
            None if self.local_ips.is_empty() => {
                lines.push(OutputLine::network(format!("  {UNAVAILABLE}")))
            }
            None => {}
        }
        lines.push(OutputLine::network(""));
        lines.push(OutputLine::network("MAC address:"));
        lines.push(OutputLine::network(format!(
            "  {}",
            self.mac_address.as_deref().unwrap_or(UNAVAILABLE)
        )));
        lines.push(OutputLine::network(""));
        lines.push(OutputLine::network("Public IP:"));
        lines.push(OutputLine::network(format!(
            "  {}",
            self.public_ip.as_deref().unwrap_or(UNAVAILABLE)
        )));
        lines.push(OutputLine::network(rule));
        lines
    }
}

fn resolve_local_ips(hostname: &str) -> Vec<IpAddr> {
    let Ok(addrs) = (hostname, 0).to_socket_addrs() else {
        return Vec::new();
    };
    let unique: BTreeSet<IpAddr> = addrs
        .map(|addr| addr.ip())
        .filter(|ip| !ip.is_loopback())
        .collect();
    unique.into_iter().collect()
}

/// The address the OS would use for outbound traffic. Connecting a UDP
/// socket sends nothing.
fn routed_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}

fn first_mac_address() -> Option<String> {
    let networks = Networks::new_with_refreshed_list();
    let mut macs: Vec<String> = networks
        .iter()
        .map(|(_, data)| data.mac_address())
        .filter(|mac| !mac.is_unspecified())
        .map(|mac| mac.to_string())
        .collect();
    macs.sort();
    macs.into_iter().next()
}

fn lookup_public_ip() -> Option<String> {
    let agent = ureq::AgentBuilder::new().timeout(PUBLIC_IP_TIMEOUT).build();
    match agent.get(PUBLIC_IP_URL).call() {
        Ok(response) => response
            .into_string()
            .ok()
            .map(|body| body.trim().to_string())
            .filter(|body| !body.is_empty()),
        Err(err) => {
            tracing::debug!("public IP lookup failed: {err}");
            None
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SystemSnapshot {
    pub os: String,
    pub kernel: Option<String>,
    pub arch: String,
    pub cpu_brand: Option<String>,
    pub hostname: Option<String>,
    pub cpu_usage: f32,
    pub logical_cores: usize,
    pub physical_cores: Option<usize>,
    pub memory_total: u64,
    pub memory_used: u64,
    pub memory_free: u64,
    pub memory_available: u64,
}

impl SystemSnapshot {
    /// Samples CPU load twice over the minimum update interval.
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu();
        sys.refresh_memory();

        let os = match (System::name(), System::os_version()) {
            (Some(name), Some(version)) => format!("{name} {version}"),
            (Some(name), None) => name,
            _ => std::env::consts::OS.to_string(),
        };
        Self {
            os,
            kernel: System::kernel_version(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_brand: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().trim().to_string())
                .filter(|brand| !brand.is_empty()),
            hostname: System::host_name(),
            cpu_usage: sys.global_cpu_info().cpu_usage(),
            logical_cores: sys.cpus().len(),
            physical_cores: sys.physical_core_count(),
            memory_total: sys.total_memory(),
            memory_used: sys.used_memory(),
            memory_free: sys.free_memory(),
            memory_available: sys.available_memory(),
        }
    }

    pub fn memory_percent(&self) -> f64 {
        if self.memory_total == 0 {
            return 0.0;
        }
        self.memory_used as f64 * 100.0 / self.memory_total as f64
    }

    pub fn lines(&self) -> Vec<String> {
        let bar = "-".repeat(50);
        let physical = self
            .physical_cores
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNAVAILABLE.to_string());
        vec![
            "SYSTEM".to_string(),
            bar.clone(),
            format!("OS: {}", self.os),
            format!("Kernel: {}", self.kernel.as_deref().unwrap_or(UNAVAILABLE)),
            format!("Architecture: {}", self.arch),
            format!("Processor: {}", self.cpu_brand.as_deref().unwrap_or(UNAVAILABLE)),
            format!("Host name: {}", self.hostname.as_deref().unwrap_or(UNAVAILABLE)),
            String::new(),
            "CPU".to_string(),
            bar.clone(),
            format!("Usage: {:.1}%", self.cpu_usage),
            format!("Cores: {physical} (logical: {})", self.logical_cores),
            String::new(),
            "MEMORY".to_string(),
            bar,
            format!("Total: {}", format_bytes(self.memory_total)),
            format!(
                "Used: {} ({:.1}%)",
                format_bytes(self.memory_used),
                self.memory_percent()
            ),
            format!("Free: {}", format_bytes(self.memory_free)),
            format!("Available: {}", format_bytes(self.memory_available)),
        ]
    }
}

/// `1536` -> `"1.50 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_byte_counts() {
        assert_eq!(format_bytes(0), "0.00 B");
        assert_eq!(format_bytes(1023), "1023.00 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(8 * 1024 * 1024 * 1024), "8.00 GB");
        assert_eq!(format_bytes(1024u64.pow(5) * 3), "3.00 PB");
    }

    #[test]
    fn missing_network_facts_render_placeholders() {
        let report = NetworkReport::default();
        let texts: Vec<String> = report.lines().into_iter().map(|l| l.text).collect();
        assert!(texts.contains(&"Host name: unavailable".to_string()));
        assert_eq!(texts.iter().filter(|t| t.trim() == "unavailable").count(), 3);
    }

    #[test]
    fn present_network_facts_are_listed() {
        let report = NetworkReport {
            hostname: Some("box".into()),
            local_ips: vec!["192.168.1.20".parse().unwrap()],
            routed_ip: Some("192.168.1.20".parse().unwrap()),
            mac_address: Some("aa:bb:cc:dd:ee:ff".into()),
            public_ip: Some("203.0.113.7".into()),
        };
        let texts: Vec<String> = report.lines().into_iter().map(|l| l.text).collect();
        assert!(texts.contains(&"  * 192.168.1.20".to_string()));
        assert!(texts.contains(&"  * 192.168.1.20 (default route)".to_string()));
        assert!(texts.contains(&"  203.0.113.7".to_string()));
        assert!(!texts.iter().any(|t| t.contains(UNAVAILABLE)));
    }

    #[test]
    fn failed_public_lookup_does_not_fail_the_report() {
        let report = NetworkReport::collect_with(|| None);
        assert!(report.public_ip.is_none());
        assert!(report.lines().iter().any(|l| l.text == "Public IP:"));
    }

    #[test]
    fn memory_percent_handles_zero_total() {
        let snapshot = SystemSnapshot::default();
        assert_eq!(snapshot.memory_percent(), 0.0);
        let text = snapshot.lines().join("\n");
        assert!(text.contains("Used: 0.00 B (0.0%)"));
    }
}
