use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

use tracing::{debug, info, trace, warn};

use super::decode::decode_frame;
use super::ticker::RefreshTicker;
use super::{CaptureError, DeviceInfo, EngineState, Frame, Result};
use crate::ports::{CaptureBackend, EventSink, FrameSource};

struct ActiveCapture {
    device: usize,
    /// `true` while frames may be published. Held across every publish so
    /// that `stop` cannot return while one is in flight.
    gate: Arc<Mutex<bool>>,
    worker: JoinHandle<()>,
}

/// Owns one live capture at a time plus the refresh ticker that goes with it.
///
/// Frames are read and decoded on a dedicated thread and handed to the
/// [`EventSink`]; the engine never sees the connection store.
pub struct CaptureEngine {
    backend: Arc<dyn CaptureBackend>,
    sink: Arc<dyn EventSink>,
    ticker: RefreshTicker,
    devices: Vec<DeviceInfo>,
    active: Option<ActiveCapture>,
}

impl CaptureEngine {
    pub fn new(backend: Arc<dyn CaptureBackend>, sink: Arc<dyn EventSink>, refresh_period: Duration) -> Self {
        Self {
            backend,
            ticker: RefreshTicker::new(sink.clone(), refresh_period),
            sink,
            devices: Vec::new(),
            active: None,
        }
    }

    /// Refresh the device cache. Indices from a previous call are invalidated.
    pub fn enumerate_devices(&mut self) -> Result<&[DeviceInfo]> {
        self.devices = self.backend.list_devices()?;
        debug!("found {} capture devices", self.devices.len());
        Ok(&self.devices)
    }

    pub fn devices(&self) -> &[DeviceInfo] {
        &self.devices
    }

    pub fn state(&self) -> EngineState {
        match &self.active {
            Some(active) => EngineState::Capturing { device: active.device },
            None => EngineState::Idle,
        }
    }

    pub fn active_device(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.device)
    }

    pub fn start(&mut self, index: usize) -> Result<()> {
        let device = self
            .devices
            .get(index)
            .cloned()
            .ok_or(CaptureError::InvalidDeviceIndex {
                index,
                available: self.devices.len(),
            })?;

        self.stop();

        let source = self.backend.open(&device).map_err(|e| {
            warn!("failed to open {}: {}", device.name, e);
            e
        })?;

        let gate = Arc::new(Mutex::new(true));
        let worker = {
            let gate = gate.clone();
            let sink = self.sink.clone();
            thread::Builder::new()
                .name(format!("capture-{}", device.name))
                .spawn(move || capture_loop(source, gate, sink))
                .map_err(|e| CaptureError::DeviceOpenError(format!("cannot spawn capture thread: {}", e)))?
        };

        self.active = Some(ActiveCapture {
            device: index,
            gate,
            worker,
        });
        if let Err(e) = self.ticker.start() {
            self.stop();
            return Err(CaptureError::DeviceOpenError(format!("cannot spawn refresh ticker: {}", e)));
        }

        info!("capturing on {} ({})", device.name, device.label());
        Ok(())
    }

    /// Stop the ticker and the capture, closing the OS handle before returning.
    pub fn stop(&mut self) {
        self.ticker.stop();

        let Some(active) = self.active.take() else {
            return;
        };

        *lock(&active.gate) = false;
        if active.worker.join().is_err() {
            warn!("capture worker panicked");
        }
        info!("capture stopped on device {}", active.device);
    }
}

impl Drop for CaptureEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

fn capture_loop(mut source: Box<dyn FrameSource>, gate: Arc<Mutex<bool>>, sink: Arc<dyn EventSink>) {
    loop {
        let frame = match source.next_frame() {
            Ok(frame) => Some(frame),
            Err(CaptureError::Timeout) => None,
            Err(e) => {
                warn!("capture worker exiting: {}", e);
                return;
            }
        };

        let running = lock(&gate);
        if !*running {
            return;
        }
        if let Some(frame) = frame {
            on_frame(&frame, sink.as_ref());
        }
    }
}

fn on_frame(frame: &Frame, sink: &dyn EventSink) {
    match decode_frame(frame, SystemTime::now()) {
        Some(record) => {
            debug!(
                "{} --> {}",
                record.source_endpoint(),
                record.destination_endpoint()
            );
            sink.connection(record);
        }
        None => trace!("dropped non-TCP frame ({} bytes)", frame.data.len()),
    }
}

fn lock(gate: &Mutex<bool>) -> MutexGuard<'_, bool> {
    gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
