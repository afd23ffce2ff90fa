use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    InvalidDeviceIndex { index: usize, available: usize },
    DeviceOpenError(String),
    DeviceListError(String),
    ReadError(String),
    Timeout,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::InvalidDeviceIndex { index, available } => {
                write!(f, "Invalid device index {} ({} devices available)", index, available)
            }
            CaptureError::DeviceOpenError(msg) => write!(f, "Cannot open capture device: {}", msg),
            CaptureError::DeviceListError(msg) => write!(f, "Cannot list capture devices: {}", msg),
            CaptureError::ReadError(msg) => write!(f, "Capture read failed: {}", msg),
            CaptureError::Timeout => write!(f, "Capture read timed out"),
        }
    }
}

impl std::error::Error for CaptureError {}

pub type Result<T> = std::result::Result<T, CaptureError>;
