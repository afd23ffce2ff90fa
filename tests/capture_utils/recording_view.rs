#![cfg(test)]
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use conlister::ports::ViewPort;

#[derive(Default)]
pub struct RecordingView {
    frames: Mutex<Vec<Vec<String>>>,
}

impl RecordingView {
    pub fn last(&self) -> Option<Vec<String>> {
        self.frames.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }
}

#[async_trait]
impl ViewPort for RecordingView {
    async fn present(&self, lines: &[String]) {
        self.frames.lock().unwrap().push(lines.to_vec());
    }
}
