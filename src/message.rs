//! Platform-neutral inbound and outbound messages

use crate::session::ConversationId;
use crate::state_machine::Keyboard;

/// Payload of an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Text(String),
    /// Stickers, photos, joins and anything else without text
    Other,
}

/// One message received from a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub conversation_id: ConversationId,
    pub kind: MessageKind,
}

impl InboundMessage {
    pub fn text(conversation_id: ConversationId, text: impl Into<String>) -> Self {
        Self {
            conversation_id,
            kind: MessageKind::Text(text.into()),
        }
    }

    pub fn other(conversation_id: ConversationId) -> Self {
        Self {
            conversation_id,
            kind: MessageKind::Other,
        }
    }
}

/// Reply to send back to a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub conversation_id: ConversationId,
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl OutboundReply {
    pub fn text(conversation_id: ConversationId, text: impl Into<String>) -> Self {
        Self {
            conversation_id,
            text: text.into(),
            keyboard: None,
        }
    }
}
