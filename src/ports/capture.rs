use crate::domain::{DeviceInfo, Frame, Result};

/// Port for the OS packet capture facility
pub trait CaptureBackend: Send + Sync {
    /// List capture-capable devices, in the order the platform reports them
    fn list_devices(&self) -> Result<Vec<DeviceInfo>>;

    /// Open a live capture on the device
    ///
    /// The returned source owns the OS handle; dropping it closes the capture.
    fn open(&self, device: &DeviceInfo) -> Result<Box<dyn FrameSource>>;
}

/// An open capture handle, polled from the capture thread
pub trait FrameSource: Send {
    /// Block until the next frame arrives or the read timeout expires
    ///
    /// A timeout is reported as `CaptureError::Timeout` so the caller can
    /// check for cancellation between reads.
    fn next_frame(&mut self) -> Result<Frame>;
}
