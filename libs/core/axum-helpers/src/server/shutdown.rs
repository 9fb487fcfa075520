use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// One shutdown flag shared by the HTTP server and the cleanup task.
///
/// Set by SIGINT/SIGTERM or by [`trigger`](Self::trigger); waiters that
/// arrive after it was set return immediately.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    flag: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            flag: Arc::new(watch::Sender::new(false)),
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.flag.borrow()
    }

    pub fn trigger(&self) {
        let first = self.flag.send_if_modified(|stopping| !std::mem::replace(stopping, true));
        if first {
            info!("Initiating graceful shutdown");
        }
    }

    /// Resolves once shutdown has been triggered from any source.
    pub async fn wait(&self) {
        let mut rx = self.flag.subscribe();

        tokio::select! {
            _ = os_signal() => self.trigger(),
            _ = rx.wait_for(|stopping| *stopping) => {},
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Ctrl+C or SIGTERM. A handler that fails to install never fires.
async fn os_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_is_idempotent() {
        let coordinator = ShutdownCoordinator::new();
        assert!(!coordinator.is_shutting_down());

        coordinator.trigger();
        coordinator.trigger();

        assert!(coordinator.is_shutting_down());
    }

    #[tokio::test]
    async fn test_waiters_wake_on_trigger() {
        let coordinator = ShutdownCoordinator::default();
        let waiter = coordinator.clone();
        let handle = tokio::spawn(async move { waiter.wait().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        coordinator.trigger();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_late_waiter_returns_immediately() {
        let coordinator = ShutdownCoordinator::new();
        coordinator.trigger();

        tokio::time::timeout(Duration::from_millis(100), coordinator.wait())
            .await
            .unwrap();
    }
}
