//! Long-polling receive loop

use super::UpdateSource;
use crate::router::ConversationRouter;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Pause after a failed poll before trying again
const RETRY_DELAY: Duration = Duration::from_secs(2);

pub struct Poller {
    source: Arc<dyn UpdateSource>,
    router: Arc<ConversationRouter>,
    poll_timeout_secs: u64,
    retry_delay: Duration,
}

impl Poller {
    pub fn new(
        source: Arc<dyn UpdateSource>,
        router: Arc<ConversationRouter>,
        poll_timeout: Duration,
    ) -> Self {
        Self {
            source,
            router,
            poll_timeout_secs: poll_timeout.as_secs(),
            retry_delay: RETRY_DELAY,
        }
    }

    #[cfg(test)]
    fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Poll until cancelled. Transport errors are logged and retried; they
    /// never end the loop.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!("Starting update polling");
        let mut offset: Option<i64> = None;

        loop {
            let polled = tokio::select! {
                () = cancel.cancelled() => break,
                polled = self.source.get_updates(offset, self.poll_timeout_secs) => polled,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        match update.into_inbound() {
                            Some(message) => self.router.route(message).await,
                            None => tracing::debug!("Skipping update without a message"),
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Polling for updates failed");
                    tokio::select! {
                        () = cancel.cancelled() => break,
                        () = tokio::time::sleep(self.retry_delay) => {}
                    }
                }
            }
        }

        tracing::info!("Update polling stopped");
    }
}
