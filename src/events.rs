use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{error, info};

use crate::constants::LISTENER_RETRY_SECS;
use crate::handlers::LoginEvent;
use crate::models::Data;
use crate::shutdown::sleep_or_shutdown;

/// Listen for login notifications and count each one.
///
/// The authentication system is expected to run `NOTIFY <channel>, '<login>'`
/// after every successful login. Events are handled one at a time.
pub fn start_login_listener(
    data: Arc<Data>,
    channel: String,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        'connect: loop {
            let mut listener = match data.db.listen(&channel).await {
                Ok(listener) => listener,
                Err(e) => {
                    error!("Failed to listen on channel '{}': {}", channel, e);
                    if sleep_or_shutdown(Duration::from_secs(LISTENER_RETRY_SECS), &mut shutdown).await {
                        break;
                    }
                    continue;
                }
            };

            info!("Listening for login events on channel '{}'", channel);

            loop {
                tokio::select! {
                    notification = listener.recv() => match notification {
                        Ok(notification) => {
                            let event = LoginEvent::from_payload(notification.payload());
                            data.login_counter.on_login(&event).await;
                        }
                        Err(e) => {
                            error!("Login listener connection lost: {}", e);
                            if sleep_or_shutdown(Duration::from_secs(LISTENER_RETRY_SECS), &mut shutdown).await {
                                break 'connect;
                            }
                            continue 'connect;
                        }
                    },
                    _ = shutdown.changed() => break 'connect,
                }
            }
        }

        info!("Login listener stopped");
    })
}
