pub mod capture;
pub mod sink;
pub mod view;

pub use capture::{CaptureBackend, FrameSource};
pub use sink::EventSink;
pub use view::ViewPort;
