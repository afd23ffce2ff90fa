use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use super::{ConnectionStore, SessionEvent};
use crate::ports::ViewPort;

/// The single owner of the connection store.
///
/// Connections, ticks and clears all arrive as [`SessionEvent`]s; every
/// event ends with the listing being rendered and handed to the view.
pub struct ConnectionSession {
    store: ConnectionStore,
    view: Arc<dyn ViewPort>,
}

impl ConnectionSession {
    pub fn new(view: Arc<dyn ViewPort>) -> Self {
        Self {
            store: ConnectionStore::new(),
            view,
        }
    }

    pub fn store(&self) -> &ConnectionStore {
        &self.store
    }

    pub async fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Connection(record) => self.store.insert(record),
            SessionEvent::Clear => {
                debug!("clearing {} connections", self.store.len());
                self.store.clear();
            }
            SessionEvent::Refresh => {}
        }

        let lines = self.store.render();
        self.view.present(&lines).await;
    }

    /// Consume events until every sender is gone, then hand the store back.
    pub async fn run(mut self, mut events: UnboundedReceiver<SessionEvent>) -> ConnectionStore {
        while let Some(event) = events.recv().await {
            self.handle(event).await;
        }
        info!("session closed with {} connections", self.store.len());
        self.store
    }
}
