//! Background timer for throttled notifications

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::controller::StreamingController;

/// A controller shared between the ingest side and the throttle driver
pub type SharedController = Arc<Mutex<StreamingController>>;

/// Lower bound on the idle wake-up period
const MIN_TICK: Duration = Duration::from_millis(1);

impl StreamingController {
    pub fn into_shared(self) -> SharedController {
        Arc::new(Mutex::new(self))
    }
}

/// Spawn a task that releases pending notifications when their throttle
/// window closes. The task ends on the first wake-up after the controller is
/// dropped.
///
/// Must be called from within a tokio runtime.
pub fn spawn_throttle_driver(controller: Weak<Mutex<StreamingController>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = match controller.upgrade() {
            Some(strong) => strong.lock().throttle_interval().max(MIN_TICK),
            None => return,
        };

        loop {
            let wake = {
                let Some(strong) = controller.upgrade() else {
                    debug!("Controller dropped, stopping throttle driver");
                    break;
                };
                let mut guard = strong.lock();
                guard.flush_due();
                let reopens_at = guard.throttle_reopens_at();
                next_wake(reopens_at, Instant::now(), period)
            };
            tokio::time::sleep_until(wake).await;
        }
    })
}

/// Wake when the open window closes, since anything pending is due then.
/// Once the window is open a new change fires at once and restarts it, so
/// sleeping a full period cannot pass a deadline.
fn next_wake(reopens_at: Option<Instant>, now: Instant, period: Duration) -> Instant {
    match reopens_at {
        Some(at) if at > now => at,
        _ => now + period,
    }
}
