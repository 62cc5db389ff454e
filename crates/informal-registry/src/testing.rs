//! In-memory transport for tests.

use crate::transport::{SentMessage, Transport, TransportError};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use informal_common::{ChannelId, MessageId, MessageRef};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    /// `send` call and the message it created.
    Send {
        /// Created message.
        message: MessageRef,
        /// Text sent.
        content: String,
    },
    /// `reply` call and the message it created.
    Reply {
        /// Message replied to.
        to: MessageRef,
        /// Created message.
        message: MessageRef,
        /// Text sent.
        content: String,
    },
    /// `edit` call.
    Edit {
        /// Edited message.
        message: MessageRef,
        /// New text.
        content: String,
    },
    /// `delete` call (recorded even when configured to fail).
    Delete {
        /// Deleted message.
        message: MessageRef,
    },
}

/// Transport that records every call instead of talking to Discord.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<TransportCall>>,
    next_id: AtomicU64,
    fail_deletes: AtomicBool,
}

impl RecordingTransport {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            ..Self::default()
        }
    }

    /// Makes every subsequent `delete` fail with [`TransportError::Forbidden`].
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// All calls so far.
    #[must_use]
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    /// Messages passed to `delete`.
    #[must_use]
    pub fn deleted(&self) -> Vec<MessageRef> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                TransportCall::Delete { message } => Some(*message),
                _ => None,
            })
            .collect()
    }

    /// Messages created by `send` or `reply`.
    #[must_use]
    pub fn created(&self) -> Vec<MessageRef> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                TransportCall::Send { message, .. } | TransportCall::Reply { message, .. } => {
                    Some(*message)
                }
                _ => None,
            })
            .collect()
    }

    fn create(&self, channel: ChannelId) -> SentMessage {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        SentMessage {
            message: MessageRef::new(channel, MessageId(id)),
            created_at: Utc::now() + Duration::milliseconds(42),
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, channel: ChannelId, content: &str) -> Result<SentMessage, TransportError> {
        let sent = self.create(channel);
        self.calls.lock().push(TransportCall::Send {
            message: sent.message,
            content: content.to_string(),
        });
        Ok(sent)
    }

    async fn reply(&self, to: MessageRef, content: &str) -> Result<SentMessage, TransportError> {
        let sent = self.create(to.channel_id);
        self.calls.lock().push(TransportCall::Reply {
            to,
            message: sent.message,
            content: content.to_string(),
        });
        Ok(sent)
    }

    async fn edit(&self, message: MessageRef, content: &str) -> Result<(), TransportError> {
        self.calls.lock().push(TransportCall::Edit {
            message,
            content: content.to_string(),
        });
        Ok(())
    }

    async fn delete(&self, message: MessageRef) -> Result<(), TransportError> {
        self.calls.lock().push(TransportCall::Delete { message });
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(TransportError::Forbidden(format!("delete {message}")));
        }
        Ok(())
    }
}
