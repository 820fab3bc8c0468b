use tokio::sync::watch;
use tokio::time::{Duration, sleep};

/// Sleep for `duration` unless shutdown is signalled first.
/// Returns true when the caller should stop.
pub async fn sleep_or_shutdown(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = sleep(duration) => false,
        _ = shutdown.changed() => true,
    }
}
