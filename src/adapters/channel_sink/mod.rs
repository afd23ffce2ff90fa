use crate::domain::{ConnectionRecord, SessionEvent};
use crate::ports::EventSink;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Event sink that forwards everything to the session task over a channel
#[derive(Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<SessionEvent>,
}

impl ChannelSink {
    pub fn new(sender: UnboundedSender<SessionEvent>) -> Self {
        Self { sender }
    }

    pub fn channel() -> (Self, UnboundedReceiver<SessionEvent>) {
        let (sender, receiver) = unbounded_channel();
        (Self::new(sender), receiver)
    }

    /// Ask the session to drop everything it has seen so far
    pub fn clear(&self) {
        self.send(SessionEvent::Clear);
    }

    fn send(&self, event: SessionEvent) {
        if self.sender.send(event).is_err() {
            log::debug!("Session is gone, dropping event");
        }
    }
}

impl EventSink for ChannelSink {
    fn connection(&self, record: ConnectionRecord) {
        self.send(SessionEvent::Connection(record));
    }

    fn refresh(&self) {
        self.send(SessionEvent::Refresh);
    }
}
