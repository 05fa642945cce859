use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

type Callback = Arc<dyn Fn() + Send + Sync>;

/// Single-shot timer that can be pushed back or cancelled.
///
/// At most one firing is pending at any time. Must be used inside a tokio
/// runtime.
pub struct HeartbeatTimer {
    callback: Callback,
    timeout: Duration,
    pending: Option<JoinHandle<()>>,
}

impl HeartbeatTimer {
    pub fn start<F>(callback: F, timeout: Duration) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut timer = Self {
            callback: Arc::new(callback),
            timeout,
            pending: None,
        };
        timer.schedule(timeout);
        timer
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Cancels the pending firing and schedules a new one. A missing or zero
    /// override falls back to the timer's own timeout.
    pub fn restart(&mut self, timeout: Option<Duration>) {
        self.stop();
        let delay = timeout
            .filter(|delay| !delay.is_zero())
            .unwrap_or(self.timeout);
        self.schedule(delay);
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn schedule(&mut self, delay: Duration) {
        debug!("Heartbeat scheduled in {:?}", delay);
        let callback = Arc::clone(&self.callback);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }
}

impl Drop for HeartbeatTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
