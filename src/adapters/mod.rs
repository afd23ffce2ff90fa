pub mod channel_sink;
pub mod pcap_capture;
pub mod terminal;

pub use channel_sink::ChannelSink;
pub use pcap_capture::{PcapBackend, PcapSettings};
pub use terminal::TerminalView;
