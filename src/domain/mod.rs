pub mod decode;
pub mod engine;
pub mod errors;
pub mod models;
pub mod session;
pub mod store;
pub mod ticker;

pub use decode::decode_frame;
pub use engine::CaptureEngine;
pub use errors::*;
pub use models::*;
pub use session::ConnectionSession;
pub use store::ConnectionStore;
pub use ticker::{RefreshTicker, DEFAULT_REFRESH_PERIOD};
