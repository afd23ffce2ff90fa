use std::net::IpAddr;
use std::time::SystemTime;

const DEVICE_LABEL_MAX_LEN: usize = 40;

/// One sighting of a TCP segment, stamped when it was decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub source_ip: IpAddr,
    pub destination_ip: IpAddr,
    pub source_port: u16,
    pub destination_port: u16,
    pub seen: SystemTime,
}

impl ConnectionRecord {
    pub fn new(
        source_ip: IpAddr,
        source_port: u16,
        destination_ip: IpAddr,
        destination_port: u16,
        seen: SystemTime,
    ) -> Self {
        Self {
            source_ip,
            destination_ip,
            source_port,
            destination_port,
            seen,
        }
    }

    pub fn source_endpoint(&self) -> String {
        format!("{}:{}", self.source_ip, self.source_port)
    }

    pub fn destination_endpoint(&self) -> String {
        format!("{}:{}", self.destination_ip, self.destination_port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
    pub description: Option<String>,
}

impl DeviceInfo {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    /// Description when the platform provides one, otherwise the device name,
    /// cut to fit a picker.
    pub fn label(&self) -> String {
        let text = self
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(&self.name);

        if text.chars().count() > DEVICE_LABEL_MAX_LEN {
            let mut label: String = text.chars().take(DEVICE_LABEL_MAX_LEN).collect();
            label.push_str("...");
            label
        } else {
            text.to_string()
        }
    }
}

/// Link-layer framing reported by the capture handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    Ethernet,
    /// BSD loopback, 4-byte address family header.
    Null,
    RawIp,
    LinuxSll,
    LinuxSll2,
    Other(i32),
}

impl LinkType {
    pub fn from_dlt(dlt: i32) -> Self {
        match dlt {
            1 => LinkType::Ethernet,
            0 | 108 => LinkType::Null,
            12 | 14 | 101 => LinkType::RawIp,
            113 => LinkType::LinuxSll,
            276 => LinkType::LinuxSll2,
            other => LinkType::Other(other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub link_type: LinkType,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(link_type: LinkType, data: Vec<u8>) -> Self {
        Self { link_type, data }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Connection(ConnectionRecord),
    Refresh,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Capturing { device: usize },
}
