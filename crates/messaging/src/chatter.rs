//! Per-record message log ("chatter").

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use salesguard_core::uuid_id;

use crate::record::RecordRef;

uuid_id!(
    /// Identifier of a posted chatter message.
    MessageId,
    "MessageId"
);

/// Whether a message is an internal note or a follower-visible discussion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSubtype {
    Note,
    Discussion,
}

/// Message to post on a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatterMessage {
    pub subject: String,
    pub body: String,
    pub subtype: MessageSubtype,
}

impl ChatterMessage {
    /// Internal note (not sent to followers).
    pub fn note(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            subtype: MessageSubtype::Note,
        }
    }
}

/// A message as stored by the chatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub id: MessageId,
    pub target: RecordRef,
    pub message: ChatterMessage,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatterError {
    #[error("chatter storage unavailable")]
    Unavailable,
}

/// Messaging sink for addressed, per-record messages.
pub trait Chatter: Send + Sync {
    fn post(&self, target: RecordRef, message: ChatterMessage) -> Result<MessageId, ChatterError>;
}

impl<C> Chatter for std::sync::Arc<C>
where
    C: Chatter + ?Sized,
{
    fn post(&self, target: RecordRef, message: ChatterMessage) -> Result<MessageId, ChatterError> {
        (**self).post(target, message)
    }
}

/// In-memory chatter for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryChatter {
    messages: Mutex<Vec<PostedMessage>>,
}

impl InMemoryChatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages posted on one record, oldest first.
    pub fn messages_for(&self, target: RecordRef) -> Vec<PostedMessage> {
        match self.messages.lock() {
            Ok(messages) => messages.iter().filter(|m| m.target == target).cloned().collect(),
            Err(_) => vec![],
        }
    }

    pub fn all(&self) -> Vec<PostedMessage> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Chatter for InMemoryChatter {
    fn post(&self, target: RecordRef, message: ChatterMessage) -> Result<MessageId, ChatterError> {
        let mut messages = self.messages.lock().map_err(|_| ChatterError::Unavailable)?;
        let id = MessageId::new();
        tracing::debug!(%target, subject = %message.subject, "chatter message posted");
        messages.push(PostedMessage {
            id,
            target,
            message,
            posted_at: Utc::now(),
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesguard_core::Uuid;

    #[test]
    fn messages_are_filtered_by_target_record() {
        let chatter = InMemoryChatter::new();
        let picking = RecordRef::new("stock.picking", Uuid::now_v7());
        let product = RecordRef::new("product.product", Uuid::now_v7());

        chatter.post(picking, ChatterMessage::note("s1", "b1")).unwrap();
        chatter.post(product, ChatterMessage::note("s2", "b2")).unwrap();
        chatter.post(picking, ChatterMessage::note("s3", "b3")).unwrap();

        let on_picking = chatter.messages_for(picking);
        assert_eq!(on_picking.len(), 2);
        assert_eq!(on_picking[0].message.subject, "s1");
        assert_eq!(on_picking[1].message.subject, "s3");
        assert_eq!(chatter.messages_for(product).len(), 1);
        assert_eq!(chatter.all().len(), 3);
    }

    #[test]
    fn same_id_under_different_models_is_a_different_record() {
        let chatter = InMemoryChatter::new();
        let id = Uuid::now_v7();
        chatter
            .post(RecordRef::new("product.product", id), ChatterMessage::note("s", "b"))
            .unwrap();

        assert!(chatter.messages_for(RecordRef::new("product.template", id)).is_empty());
    }

    #[test]
    fn note_builder_sets_note_subtype() {
        let msg = ChatterMessage::note("subject", "body");
        assert_eq!(msg.subtype, MessageSubtype::Note);
    }
}
