//! Per-conversation workers
//!
//! Every conversation gets its own task fed by an unbounded channel, so its
//! messages are handled strictly in arrival order while other conversations
//! run in parallel. Routing never waits on a worker, so a conversation stuck
//! behind a slow lookup cannot hold up the others. Workers stop after sitting
//! idle and are restarted by the next message.

use crate::dispatcher::Dispatcher;
use crate::message::InboundMessage;
use crate::session::ConversationId;
use crate::telegram::ReplySink;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

/// How long a worker waits for a message before stopping
const WORKER_IDLE: Duration = Duration::from_secs(600);

struct Worker {
    id: u64,
    tx: mpsc::UnboundedSender<InboundMessage>,
}

type WorkerMap = Arc<Mutex<HashMap<ConversationId, Worker>>>;

/// Routes inbound messages to conversation workers
pub struct ConversationRouter {
    dispatcher: Arc<Dispatcher>,
    sink: Arc<dyn ReplySink>,
    /// Senders are only used while this lock is held
    workers: WorkerMap,
    handles: Mutex<Vec<JoinHandle<()>>>,
    next_id: AtomicU64,
    idle_timeout: Duration,
}

impl ConversationRouter {
    pub fn new(dispatcher: Arc<Dispatcher>, sink: Arc<dyn ReplySink>) -> Self {
        Self {
            dispatcher,
            sink,
            workers: Arc::new(Mutex::new(HashMap::new())),
            handles: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
            idle_timeout: WORKER_IDLE,
        }
    }

    #[cfg(test)]
    fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Queue a message on its conversation's worker, starting one if needed.
    /// Never waits for the worker to catch up.
    pub async fn route(&self, message: InboundMessage) {
        let conv_id = message.conversation_id;
        let mut workers = self.workers.lock().await;

        let message = match workers.get(&conv_id) {
            Some(worker) => match worker.tx.send(message) {
                Ok(()) => return,
                Err(mpsc::error::SendError(message)) => {
                    tracing::warn!(conv_id = %conv_id, "Conversation worker stopped, restarting");
                    message
                }
            },
            None => message,
        };

        let worker = self.spawn_worker(conv_id).await;
        if worker.tx.send(message).is_err() {
            tracing::error!(conv_id = %conv_id, "Dropping message, worker unavailable");
        }
        workers.insert(conv_id, worker);
        tracing::debug!(conv_id = %conv_id, workers = workers.len(), "Started conversation worker");
    }

    async fn spawn_worker(&self, conv_id: ConversationId) -> Worker {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_worker(
            conv_id,
            id,
            rx,
            self.dispatcher.clone(),
            self.sink.clone(),
            self.workers.clone(),
            self.idle_timeout,
        ));

        let mut handles = self.handles.lock().await;
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
        Worker { id, tx }
    }

    /// Number of live conversation workers
    pub async fn worker_count(&self) -> usize {
        self.workers.lock().await.len()
    }

    /// Stop accepting messages and wait for queued ones to finish
    pub async fn shutdown(&self) {
        self.workers.lock().await.clear();
        let handles = std::mem::take(&mut *self.handles.lock().await);
        tracing::info!(workers = handles.len(), "Draining conversation workers");
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Conversation worker panicked");
            }
        }
    }
}

async fn run_worker(
    conv_id: ConversationId,
    id: u64,
    mut rx: mpsc::UnboundedReceiver<InboundMessage>,
    dispatcher: Arc<Dispatcher>,
    sink: Arc<dyn ReplySink>,
    workers: WorkerMap,
    idle_timeout: Duration,
) {
    loop {
        let message = match tokio::time::timeout(idle_timeout, rx.recv()).await {
            Ok(Some(message)) => message,
            Ok(None) => break,
            Err(_) => {
                let mut workers = workers.lock().await;
                // Sends happen under this lock, so an empty queue stays empty
                if !rx.is_empty() {
                    continue;
                }
                if workers.get(&conv_id).is_some_and(|w| w.id == id) {
                    workers.remove(&conv_id);
                }
                tracing::debug!(conv_id = %conv_id, "Conversation worker idle, stopping");
                break;
            }
        };

        let Some(reply) = dispatcher.dispatch(&message).await else {
            continue;
        };
        if let Err(e) = sink.send_reply(&reply).await {
            tracing::warn!(conv_id = %conv_id, error = %e, "Failed to send reply");
        }
    }
    tracing::debug!(conv_id = %conv_id, "Conversation worker stopped");
}
