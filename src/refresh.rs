//! Periodic refresh scheduling.
//!
//! One scheduler owns one worker thread and its stop flag; there is no
//! module-global interval handle. Callers inject the tick callback, which is
//! where their fetch-and-redraw logic lives.

use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

/// Runs a callback at a fixed interval until cancelled.
///
/// `start` has restart semantics: calling it while a loop is running cancels
/// the old loop first, matching the behavior expected of a dashboard
/// auto-refresh toggle. The scheduler cancels itself on drop.
pub struct RefreshScheduler {
    interval: Duration,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Begin ticking. The first tick fires after one full interval, not
    /// immediately; callers wanting an eager first refresh invoke the
    /// callback themselves before starting.
    pub fn start<F>(&mut self, mut tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.cancel();
        let stop = Arc::new(AtomicBool::new(false));
        self.stop = Arc::clone(&stop);
        let interval = self.interval;
        debug!("starting refresh loop, interval {interval:?}");
        self.handle = Some(std::thread::spawn(move || {
            loop {
                // Sleep in short slices so cancellation takes effect promptly
                // even with long intervals.
                let mut remaining = interval;
                while remaining > Duration::ZERO {
                    if stop.load(Ordering::Relaxed) {
                        return;
                    }
                    let slice = remaining.min(Duration::from_millis(25));
                    std::thread::sleep(slice);
                    remaining = remaining.saturating_sub(slice);
                }
                if stop.load(Ordering::Relaxed) {
                    return;
                }
                tick();
            }
        }));
    }

    /// Stop the loop and wait for the worker to exit. No-op when idle.
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            debug!("stopping refresh loop");
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
