use std::io;
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::ports::EventSink;

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_millis(250);

struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Periodic refresh signal so "secs ago" keeps moving when no packets arrive.
///
/// Each `start` spawns its own thread. The thread waits out the rest of each
/// period on a stop channel, so `stop` wakes it and joins it: no tick is
/// published once `stop` has returned.
pub struct RefreshTicker {
    sink: Arc<dyn EventSink>,
    period: Duration,
    worker: Option<Worker>,
}

impl RefreshTicker {
    pub fn new(sink: Arc<dyn EventSink>, period: Duration) -> Self {
        Self {
            sink,
            period,
            worker: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// # Panics
    ///
    /// Panics if the ticker is already running; callers pair `start` with `stop`.
    pub fn start(&mut self) -> io::Result<()> {
        assert!(self.worker.is_none(), "refresh ticker already running");

        let (stop, stopped) = channel::<()>();
        let sink = self.sink.clone();
        let period = self.period;

        let handle = thread::Builder::new()
            .name("refresh-ticker".into())
            .spawn(move || loop {
                let started = Instant::now();
                sink.refresh();

                match stopped.recv_timeout(period.saturating_sub(started.elapsed())) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    _ => {
                        debug!("refresh ticker stopped");
                        return;
                    }
                }
            })?;

        self.worker = Some(Worker { stop, handle });
        Ok(())
    }

    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        drop(worker.stop);
        if worker.handle.join().is_err() {
            warn!("refresh ticker panicked");
        }
    }
}

impl Drop for RefreshTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSink {
        refreshes: AtomicUsize,
    }

    impl EventSink for CountingSink {
        fn connection(&self, _: ConnectionRecord) {}

        fn refresh(&self) {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_ticks_while_running_and_stops_after_stop() {
        let sink = Arc::new(CountingSink::default());
        let mut ticker = RefreshTicker::new(sink.clone(), Duration::from_millis(10));

        ticker.start().unwrap();
        assert!(ticker.is_running());
        thread::sleep(Duration::from_millis(100));
        ticker.stop();
        assert!(!ticker.is_running());

        let after_stop = sink.refreshes.load(Ordering::SeqCst);
        assert!(after_stop >= 2, "expected several ticks, got {}", after_stop);

        thread::sleep(Duration::from_millis(60));
        assert_eq!(sink.refreshes.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_stop_is_idempotent_and_restart_is_allowed() {
        let sink = Arc::new(CountingSink::default());
        let mut ticker = RefreshTicker::new(sink, Duration::from_millis(10));

        ticker.stop();
        ticker.start().unwrap();
        ticker.stop();
        ticker.stop();
        ticker.start().unwrap();
        assert!(ticker.is_running());
    }

    #[test]
    #[should_panic(expected = "refresh ticker already running")]
    fn test_double_start_panics() {
        let sink = Arc::new(CountingSink::default());
        let mut ticker = RefreshTicker::new(sink, Duration::from_millis(10));

        ticker.start().unwrap();
        let _ = ticker.start();
    }
}
