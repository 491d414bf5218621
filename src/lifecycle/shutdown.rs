//! Shutdown coordination for the gateway.

use tokio::sync::broadcast;

use crate::lifecycle::signals;

/// Coordinator for graceful shutdown.
///
/// The server and any test harness subscribe; the first trigger wins.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Returns false when nobody was listening.
    pub fn trigger(&self) -> bool {
        self.tx.send(()).is_ok()
    }

    /// Trigger once SIGINT or SIGTERM arrives.
    pub fn on_os_signal(&self) -> tokio::task::JoinHandle<()> {
        let shutdown = self.clone();
        tokio::spawn(async move {
            let signal = signals::wait_for_signal().await;
            tracing::info!(signal = signal, "Received signal, shutting down");
            shutdown.trigger();
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_subscribers() {
        let shutdown = Shutdown::new();
        assert!(!shutdown.trigger());

        let mut rx = shutdown.subscribe();
        assert!(shutdown.clone().trigger());
        assert!(rx.recv().await.is_ok());
    }
}
