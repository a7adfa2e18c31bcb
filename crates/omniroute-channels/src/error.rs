//! Orchestration error types.

use omniroute_core::Channel;
use thiserror::Error;

/// Errors raised while deciding a route.
#[derive(Debug, Error)]
pub enum RouteError {
    /// No channel satisfies the availability criteria for the recipient.
    #[error("no available channel for recipient {recipient}")]
    NoAvailableChannel {
        /// Recipient the routing was attempted for.
        recipient: String,
    },
}

/// A failure raised by a channel's transport adapter.
///
/// The dispatch coordinator does not distinguish between these variants when
/// deciding whether to fall back: any sender failure triggers the single
/// fallback attempt.
#[derive(Debug, Error)]
pub enum SenderError {
    /// The recipient has no contact identifier for the channel.
    #[error("no {channel} contact on file for recipient {recipient}")]
    MissingContact {
        /// Channel that was attempted.
        channel: Channel,
        /// Recipient the send was attempted for.
        recipient: String,
    },

    /// Network or transport-level failure.
    #[error("transport error on {channel}: {message}")]
    Transport {
        /// Channel that was attempted.
        channel: Channel,
        /// Transport error detail.
        message: String,
    },

    /// The provider accepted the request but rejected the message.
    #[error("{channel} provider rejected the message: {message}")]
    Rejected {
        /// Channel that was attempted.
        channel: Channel,
        /// Provider error detail.
        message: String,
    },

    /// The send did not complete within the configured timeout.
    #[error("send via {channel} timed out after {seconds}s")]
    Timeout {
        /// Channel that was attempted.
        channel: Channel,
        /// Timeout that elapsed.
        seconds: u64,
    },
}

impl SenderError {
    /// Create a missing-contact error.
    pub fn missing_contact(channel: Channel, recipient: impl Into<String>) -> Self {
        Self::MissingContact {
            channel,
            recipient: recipient.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(channel: Channel, message: impl Into<String>) -> Self {
        Self::Transport {
            channel,
            message: message.into(),
        }
    }

    /// Create a provider rejection error.
    pub fn rejected(channel: Channel, message: impl Into<String>) -> Self {
        Self::Rejected {
            channel,
            message: message.into(),
        }
    }
}
