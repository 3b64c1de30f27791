//! Background cleanup worker for expired sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::SessionStore;

/// Run the cleanup worker until `shutdown` is cancelled.
/// The first purge happens one `interval` after start.
pub async fn run_cleanup_worker(
    store: Arc<SessionStore>,
    interval: Duration,
    shutdown: CancellationToken,
) {
    tracing::info!(interval_secs = interval.as_secs(), "Starting session cleanup worker");

    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await; // Skip the immediate tick

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = store.purge_expired();
                if removed > 0 {
                    tracing::info!(expired_sessions = removed, "Cleaned up expired sessions");
                }
            }
            () = shutdown.cancelled() => {
                tracing::info!("Session cleanup worker shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;

    #[tokio::test]
    async fn test_worker_purges_and_stops() {
        let store = Arc::new(SessionStore::new(Duration::ZERO));
        store.save("tok", Session::default());

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(run_cleanup_worker(
            store.clone(),
            Duration::from_millis(10),
            shutdown.clone(),
        ));

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert!(store.is_empty());
    }
}
