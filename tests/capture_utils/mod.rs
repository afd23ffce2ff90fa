#![cfg(test)]
#![allow(dead_code)]

pub mod fake_backend;
pub mod frames;
pub mod recording_view;

pub use fake_backend::FakeBackend;
pub use frames::{tcp_frame, udp_frame};
pub use recording_view::RecordingView;
