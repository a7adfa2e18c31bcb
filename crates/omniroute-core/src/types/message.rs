//! Outbound message types: recipient context and content.

use super::{Channel, ChannelPreferences};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of message being sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Appointment confirmation or reminder.
    Appointment,

    /// Transactional notification.
    Notification,

    /// Marketing/promotional content.
    Marketing,

    /// Survey or feedback request.
    Survey,

    /// Anything else.
    #[default]
    General,
}

/// Priority level of an outbound message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Urgent,
    High,
    #[default]
    Normal,
    Low,
}

/// Priority of an outbound message. Created once per message, never mutated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MessagePriority {
    /// Priority level.
    pub level: PriorityLevel,

    /// Optional delivery deadline in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_within_minutes: Option<u32>,
}

impl MessagePriority {
    /// Create a priority at the given level.
    pub fn new(level: PriorityLevel) -> Self {
        Self {
            level,
            send_within_minutes: None,
        }
    }

    /// Urgent priority.
    pub fn urgent() -> Self {
        Self::new(PriorityLevel::Urgent)
    }

    /// High priority.
    pub fn high() -> Self {
        Self::new(PriorityLevel::High)
    }

    /// Normal priority.
    pub fn normal() -> Self {
        Self::new(PriorityLevel::Normal)
    }

    /// Low priority.
    pub fn low() -> Self {
        Self::new(PriorityLevel::Low)
    }

    /// Set a delivery deadline in minutes.
    pub fn send_within(mut self, minutes: u32) -> Self {
        self.send_within_minutes = Some(minutes);
        self
    }
}

/// Per-send recipient context.
///
/// Created per call and discarded after the call completes; the orchestrator
/// never persists or caches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContext {
    /// Tenant the send is made on behalf of.
    pub tenant_id: String,

    /// Recipient identifier in the tenant's CRM.
    pub recipient_id: String,

    /// Recipient display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,

    /// Phone number for SMS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// WhatsApp identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,

    /// Telegram identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,

    /// Kind of message.
    #[serde(default)]
    pub message_type: MessageType,

    /// Message priority.
    #[serde(default)]
    pub priority: MessagePriority,

    /// Tenant/recipient channel preferences.
    #[serde(default)]
    pub preferences: ChannelPreferences,
}

impl MessageContext {
    /// Create a context with no contact points.
    pub fn new(tenant_id: impl Into<String>, recipient_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            recipient_id: recipient_id.into(),
            recipient_name: None,
            phone: None,
            email: None,
            whatsapp: None,
            telegram: None,
            message_type: MessageType::default(),
            priority: MessagePriority::default(),
            preferences: ChannelPreferences::default(),
        }
    }

    /// Set the recipient display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.recipient_name = Some(name.into());
        self
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the WhatsApp identity.
    pub fn with_whatsapp(mut self, whatsapp: impl Into<String>) -> Self {
        self.whatsapp = Some(whatsapp.into());
        self
    }

    /// Set the Telegram identity.
    pub fn with_telegram(mut self, telegram: impl Into<String>) -> Self {
        self.telegram = Some(telegram.into());
        self
    }

    /// Set the message type.
    pub fn with_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: MessagePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the channel preferences.
    pub fn with_preferences(mut self, preferences: ChannelPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// The contact identifier for a channel, if known and non-empty.
    pub fn contact_for(&self, channel: Channel) -> Option<&str> {
        let contact = match channel {
            Channel::Sms => self.phone.as_deref(),
            Channel::Email => self.email.as_deref(),
            Channel::WhatsApp => self.whatsapp.as_deref(),
            Channel::Telegram => self.telegram.as_deref(),
        };
        contact.filter(|c| !c.is_empty())
    }
}

/// An attachment on an outbound message.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// File name.
    pub filename: String,

    /// File contents.
    pub content: Bytes,

    /// MIME type.
    pub content_type: String,
}

impl Attachment {
    /// Create an attachment with an explicit MIME type.
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<Bytes>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            content_type: content_type.into(),
        }
    }

    /// Create an attachment, guessing the MIME type from the file name.
    pub fn from_bytes(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let filename = filename.into();
        let content_type = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            filename,
            content: content.into(),
            content_type,
        }
    }
}

/// Pre-rendered message content. Immutable once constructed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageContent {
    /// Subject line (email).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Plain-text body.
    pub body: String,

    /// HTML body (email).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Template identifier, when the sender renders a provider template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    /// Key/value substitutions for the template.
    #[serde(default)]
    pub data: HashMap<String, String>,

    /// Binary attachments. Not serialized; carried in-process only.
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
}

impl MessageContent {
    /// Create text-only content.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Set the subject line.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the HTML body.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set the template identifier.
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Add a template substitution.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Add an attachment.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Whether the content carries HTML or attachments.
    pub fn has_rich_content(&self) -> bool {
        self.html.is_some() || !self.attachments.is_empty()
    }
}
