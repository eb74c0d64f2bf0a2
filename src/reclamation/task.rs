use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::sweep_expired;
use crate::errors::{Result, TinylinkError};
use crate::storage::LinkStore;

/// Handle to the background reclamation task
///
/// The task ticks every `interval` (first sweep one interval after start)
/// until [`Reclaimer::shutdown`] is awaited or the handle is dropped.
#[derive(Debug)]
pub struct Reclaimer {
    shutdown_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
    interval: Duration,
}

impl Reclaimer {
    /// Spawn the task on the current Tokio runtime
    pub fn spawn(store: LinkStore, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(TinylinkError::config("reclamation interval must be non-zero"));
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            TinylinkError::runtime(
                "the reclamation process requires a Tokio runtime; \
                 start the service from within #[tokio::main] or #[tokio::test]",
            )
        })?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = runtime.spawn(Self::run(store, interval, shutdown_rx));
        info!("Reclamation process started (interval {:?})", interval);

        Ok(Self {
            shutdown_tx,
            handle: Mutex::new(Some(handle)),
            interval,
        })
    }

    async fn run(store: LinkStore, interval: Duration, mut shutdown_rx: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // 跳过第一次立即触发的 tick
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    sweep_expired(&store);
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("Reclamation process stopped");
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop scheduling sweeps and wait for an in-flight one to finish.
    /// Calling it again is a no-op.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Reclamation task ended abnormally: {}", e);
            }
            info!("Reclamation process shut down");
        }
    }
}

impl Drop for Reclaimer {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}
