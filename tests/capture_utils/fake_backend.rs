#![cfg(test)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use conlister::domain::{CaptureError, DeviceInfo, Frame, Result};
use conlister::ports::{CaptureBackend, FrameSource};

/// Capture backend whose devices are fed by hand
pub struct FakeBackend {
    devices: Vec<DeviceInfo>,
    feed: Mutex<Option<Sender<Frame>>>,
    opened: Mutex<Vec<String>>,
    closed: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub fn with_devices(names: &[&str]) -> Self {
        Self {
            devices: names
                .iter()
                .map(|name| DeviceInfo::new(*name, Some(format!("Fake adapter {}", name))))
                .collect(),
            feed: Mutex::new(None),
            opened: Mutex::new(Vec::new()),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Push a frame to the most recently opened device.
    /// Returns false when no capture has the device open anymore.
    pub fn inject(&self, frame: Frame) -> bool {
        match self.feed.lock().unwrap().as_ref() {
            Some(sender) => sender.send(frame).is_ok(),
            None => false,
        }
    }

    /// Close the feed of the open device, so its next read fails.
    pub fn fail_reads(&self) {
        *self.feed.lock().unwrap() = None;
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl CaptureBackend for FakeBackend {
    fn list_devices(&self) -> Result<Vec<DeviceInfo>> {
        Ok(self.devices.clone())
    }

    fn open(&self, device: &DeviceInfo) -> Result<Box<dyn FrameSource>> {
        if device.name.starts_with("denied") {
            return Err(CaptureError::DeviceOpenError(format!("{}: permission denied", device.name)));
        }

        let (sender, receiver) = channel();
        *self.feed.lock().unwrap() = Some(sender);
        self.opened.lock().unwrap().push(device.name.clone());

        Ok(Box::new(FakeSource {
            receiver,
            closed: self.closed.clone(),
        }))
    }
}

struct FakeSource {
    receiver: Receiver<Frame>,
    closed: Arc<AtomicUsize>,
}

impl FrameSource for FakeSource {
    fn next_frame(&mut self) -> Result<Frame> {
        match self.receiver.recv_timeout(Duration::from_millis(10)) {
            Ok(frame) => Ok(frame),
            Err(RecvTimeoutError::Timeout) => Err(CaptureError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(CaptureError::ReadError("feed closed".into())),
        }
    }
}

impl Drop for FakeSource {
    fn drop(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
