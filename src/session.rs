//! Per-conversation mode table
//!
//! Each conversation's mode sits behind its own mutex so one conversation
//! waiting on a provider never blocks another. The outer map lock is held
//! only long enough to find or insert an entry.

use crate::state_machine::Mode;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// Stable platform-assigned conversation key (a Telegram chat id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId(pub i64);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exclusive access to one conversation's mode
pub type ModeGuard = OwnedMutexGuard<Mode>;

/// In-memory store of conversation modes. Lost on restart, which resets
/// every conversation to [`Mode::Idle`].
#[derive(Default)]
pub struct SessionStore {
    modes: RwLock<HashMap<ConversationId, Arc<Mutex<Mode>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, conversation_id: ConversationId) -> Arc<Mutex<Mode>> {
        {
            let modes = self.modes.read().await;
            if let Some(slot) = modes.get(&conversation_id) {
                return slot.clone();
            }
        }

        self.modes
            .write()
            .await
            .entry(conversation_id)
            .or_default()
            .clone()
    }

    /// Lock a conversation's mode for a whole dispatch.
    pub async fn lock(&self, conversation_id: ConversationId) -> ModeGuard {
        self.slot(conversation_id).await.lock_owned().await
    }

    /// Current mode; `Idle` for a conversation never seen.
    #[allow(dead_code)] // Dispatch goes through `lock`; used for inspection
    pub async fn get_mode(&self, conversation_id: ConversationId) -> Mode {
        let slot = self.modes.read().await.get(&conversation_id).cloned();
        match slot {
            Some(slot) => *slot.lock().await,
            None => Mode::Idle,
        }
    }

    #[allow(dead_code)] // Dispatch goes through `lock`; used for inspection
    pub async fn set_mode(&self, conversation_id: ConversationId, mode: Mode) {
        *self.lock(conversation_id).await = mode;
    }

    /// Number of conversations seen so far
    pub async fn len(&self) -> usize {
        self.modes.read().await.len()
    }
}
