use crate::domain::{CaptureError, DeviceInfo, Frame, LinkType, Result};
use crate::ports::{CaptureBackend, FrameSource};
use log::{debug, info};
use pcap::{Active, Capture, Device};

#[derive(Debug, Clone)]
pub struct PcapSettings {
    pub snaplen: i32,
    pub promiscuous: bool,
    /// Upper bound on how long a read blocks, so the capture thread can
    /// notice a stop request.
    pub read_timeout_ms: i32,
}

impl Default for PcapSettings {
    fn default() -> Self {
        Self {
            snaplen: 65535,
            promiscuous: true,
            read_timeout_ms: 100,
        }
    }
}

/// libpcap-backed capture backend
pub struct PcapBackend {
    settings: PcapSettings,
}

impl PcapBackend {
    pub fn new(settings: PcapSettings) -> Self {
        Self { settings }
    }
}

impl Default for PcapBackend {
    fn default() -> Self {
        Self::new(PcapSettings::default())
    }
}

impl CaptureBackend for PcapBackend {
    fn list_devices(&self) -> Result<Vec<DeviceInfo>> {
        let devices = Device::list().map_err(|e| CaptureError::DeviceListError(e.to_string()))?;

        Ok(devices
            .into_iter()
            .map(|d| DeviceInfo::new(d.name, d.desc))
            .collect())
    }

    fn open(&self, device: &DeviceInfo) -> Result<Box<dyn FrameSource>> {
        let open_error = |e: pcap::Error| CaptureError::DeviceOpenError(format!("{}: {}", device.name, e));

        let capture = Capture::from_device(device.name.as_str())
            .map_err(open_error)?
            .promisc(self.settings.promiscuous)
            .snaplen(self.settings.snaplen)
            .timeout(self.settings.read_timeout_ms)
            .immediate_mode(true)
            .open()
            .map_err(open_error)?;

        let datalink = capture.get_datalink();
        debug!("{} uses datalink {:?}", device.name, datalink);
        info!("Opened {} (snaplen={}, promisc={})", device.name, self.settings.snaplen, self.settings.promiscuous);

        Ok(Box::new(PcapSource {
            link_type: LinkType::from_dlt(datalink.0),
            capture,
        }))
    }
}

struct PcapSource {
    capture: Capture<Active>,
    link_type: LinkType,
}

impl FrameSource for PcapSource {
    fn next_frame(&mut self) -> Result<Frame> {
        match self.capture.next_packet() {
            Ok(packet) => Ok(Frame::new(self.link_type, packet.data.to_vec())),
            Err(pcap::Error::TimeoutExpired) => Err(CaptureError::Timeout),
            Err(e) => Err(CaptureError::ReadError(e.to_string())),
        }
    }
}
