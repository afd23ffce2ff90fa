mod backend;

pub use backend::{PcapBackend, PcapSettings};
