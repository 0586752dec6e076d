use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, info};

use crate::system::signal::RefreshSignal;

#[derive(Debug, Default)]
pub struct ShutdownMonitor {
    aborted: Mutex<bool>,
    wake: Condvar,
}

impl ShutdownMonitor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn abort_requested(&self) -> bool {
        *self.aborted.lock()
    }

    pub fn request_abort(&self) {
        *self.aborted.lock() = true;
        self.wake.notify_all();
    }

    /// Sleeps for up to `timeout`; returns true as soon as shutdown is
    /// requested.
    pub fn wait_for_abort(&self, timeout: Duration) -> bool {
        let mut aborted = self.aborted.lock();
        if !*aborted {
            let _ = self
                .wake
                .wait_while_for(&mut aborted, |aborted| !*aborted, timeout);
        }
        *aborted
    }
}

pub fn run(monitor: &ShutdownMonitor, signal: &dyn RefreshSignal, interval: Duration) {
    info!(?interval, "refresh loop started");
    while !monitor.abort_requested() {
        if monitor.wait_for_abort(interval) {
            break;
        }
        debug!("periodic refresh");
        signal.refresh_container();
    }
    info!("refresh loop stopped");
}
