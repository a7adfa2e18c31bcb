//! The sender contract implemented by transport adapters.

use crate::error::SenderError;
use async_trait::async_trait;
use omniroute_core::{Channel, MessageContent, MessageContext};
use std::fmt::Debug;

/// Receipt returned by a sender on successful delivery hand-off.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Message ID assigned by the provider.
    pub message_id: String,

    /// Provider-reported status (e.g. "queued", "sent").
    pub status: String,
}

impl SendReceipt {
    /// Create a receipt with status `"sent"`.
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            status: "sent".to_string(),
        }
    }

    /// Set the provider-reported status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// A transport adapter for one channel.
///
/// Implementations are constructed and injected by the hosting application
/// (SMS via Twilio, email via Resend, and so on); the orchestrator has no
/// knowledge of HTTP, API keys, or vendor payload formats. Implementations
/// must be safe to call concurrently.
#[async_trait]
pub trait ChannelSender: Send + Sync + Debug {
    /// The channel this sender delivers through.
    fn channel(&self) -> Channel;

    /// Deliver the content to the recipient described by the context.
    ///
    /// Returns a receipt on success; any failure (missing contact info,
    /// transport error, provider rejection) is a [`SenderError`].
    async fn send(
        &self,
        context: &MessageContext,
        content: &MessageContent,
    ) -> Result<SendReceipt, SenderError>;
}
