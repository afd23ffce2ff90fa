use crate::domain::ConnectionRecord;

/// Port through which the capture engine and the refresh ticker publish
///
/// Implementations are called from background threads and must hand the
/// notification over to the owning context instead of touching view state.
pub trait EventSink: Send + Sync {
    fn connection(&self, record: ConnectionRecord);

    fn refresh(&self);
}
