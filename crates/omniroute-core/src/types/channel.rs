//! Channel identity for outbound routing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A communication channel the orchestrator can deliver through.
///
/// Voice is handled by a separate subsystem and is deliberately absent here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Text message to a phone number.
    Sms,

    /// Email to a mailbox.
    Email,

    /// WhatsApp message to a WhatsApp identity.
    WhatsApp,

    /// Telegram message to a Telegram identity.
    Telegram,
}

impl Channel {
    /// All channels, in the canonical evaluation order.
    pub const ALL: [Channel; 4] = [
        Channel::Sms,
        Channel::Email,
        Channel::WhatsApp,
        Channel::Telegram,
    ];

    /// Get the channel as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Email => "email",
            Channel::WhatsApp => "whatsapp",
            Channel::Telegram => "telegram",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
