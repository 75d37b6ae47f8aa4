//! Shutdown coordination for the watcher.

use tokio::sync::watch;

/// Coordinator for graceful shutdown.
///
/// Hands out [`ShutdownHandle`]s that long-running tasks await. Once
/// triggered, every current and future handle observes the signal.
#[derive(Debug)]
pub struct ShutdownSignal {
    tx: watch::Sender<bool>,
}

impl ShutdownSignal {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Take a handle that can await the signal.
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }

    /// Whether shutdown has been triggered.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// A task-side view of the shutdown signal.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    rx: watch::Receiver<bool>,
}

impl ShutdownHandle {
    /// Resolve once shutdown is triggered.
    ///
    /// Resolves immediately if the trigger already happened, and also when
    /// the coordinator is dropped.
    pub async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}
