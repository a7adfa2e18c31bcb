//! Channel scoring.
//!
//! Each signal is a pure function returning a point delta and an optional
//! justification; [`score_channel`] folds them in a fixed order. New signals
//! can be added to the fold without touching the existing ones.

use crate::quiet_hours::is_quiet_hours;
use chrono::NaiveTime;
use omniroute_core::{
    Channel, ChannelPreferences, MessageContent, MessageContext, MessageType, PriorityLevel,
};
use serde::Serialize;

/// Fixed calibration divisor for score normalization. Not derived from the
/// signal count; changing it reshuffles every ranking.
const SCORE_DIVISOR: f64 = 100.0;

/// Delivery estimate used when no urgency rule matches.
const DEFAULT_DELIVERY_SECONDS: u32 = 60;

/// SMS bodies longer than this are split into multiple segments.
const SMS_SEGMENT_CHARS: usize = 160;

/// Outcome of a single scoring signal.
#[derive(Debug, Clone, Copy)]
pub struct SignalScore {
    /// Signed point delta.
    pub points: i32,

    /// Human-readable justification, present only when the signal fired.
    pub reason: Option<&'static str>,
}

impl SignalScore {
    /// A signal that did not fire.
    pub const NONE: SignalScore = SignalScore {
        points: 0,
        reason: None,
    };

    /// A signal that fired with the given delta and justification.
    pub fn new(points: i32, reason: &'static str) -> Self {
        Self {
            points,
            reason: Some(reason),
        }
    }
}

/// Evaluation of one channel for one message.
///
/// Computed fresh on every decision and never cached: preferences, the time
/// of day, and the content can all change between calls.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelEvaluation {
    /// Channel that was evaluated.
    pub channel: Channel,

    /// Normalized score in `[0, 1]`.
    pub score: f64,

    /// Justifications from every signal that fired, in evaluation order.
    pub reasons: Vec<String>,

    /// Estimated monetary cost of one send.
    pub cost: f64,

    /// Estimated delivery latency in seconds.
    pub delivery_time_seconds: u32,
}

/// +30 when the recipient prefers this channel.
pub fn score_by_user_preference(channel: Channel, preferences: &ChannelPreferences) -> SignalScore {
    if preferences.is_preferred(channel) {
        SignalScore::new(30, "Preferred channel")
    } else {
        SignalScore::NONE
    }
}

/// Urgency-based delta plus the delivery latency estimate for the channel.
pub fn score_by_priority(channel: Channel, level: PriorityLevel) -> (SignalScore, u32) {
    match (level, channel) {
        (PriorityLevel::Urgent, Channel::Sms) => (
            SignalScore::new(25, "SMS best for urgent messages (98% open rate)"),
            10,
        ),
        (PriorityLevel::Urgent, Channel::WhatsApp) => {
            (SignalScore::new(20, "WhatsApp good for urgent messages"), 30)
        }
        (PriorityLevel::Urgent, Channel::Email) => {
            (SignalScore::new(5, "Email slower for urgent messages"), 300)
        }
        (PriorityLevel::Normal, Channel::Email) => {
            (SignalScore::new(20, "Email ideal for normal priority"), 60)
        }
        (PriorityLevel::Normal, Channel::Sms) => {
            (SignalScore::new(15, "SMS works for normal priority"), 10)
        }
        (PriorityLevel::Low, Channel::Email) => (
            SignalScore::new(25, "Email best for low priority (cost-effective)"),
            120,
        ),
        _ => (SignalScore::NONE, DEFAULT_DELIVERY_SECONDS),
    }
}

/// Rich content (HTML or attachments) favors channels that can render it.
pub fn score_by_content(channel: Channel, content: &MessageContent) -> SignalScore {
    if !content.has_rich_content() {
        return SignalScore::NONE;
    }

    match channel {
        Channel::Email => SignalScore::new(25, "Email supports rich content and attachments"),
        Channel::WhatsApp => SignalScore::new(15, "WhatsApp supports rich media"),
        Channel::Sms => SignalScore::new(-20, "SMS limited for rich content"),
        Channel::Telegram => SignalScore::NONE,
    }
}

/// Long bodies favor email and penalize SMS segmentation cost.
pub fn score_by_message_length(channel: Channel, body_chars: usize) -> SignalScore {
    if body_chars <= SMS_SEGMENT_CHARS {
        return SignalScore::NONE;
    }

    match channel {
        Channel::Email => SignalScore::new(20, "Email better for long messages"),
        Channel::Sms => SignalScore::new(-10, "SMS expensive for long messages"),
        Channel::WhatsApp | Channel::Telegram => SignalScore::NONE,
    }
}

/// Per-channel cost delta plus the estimated cost of one send.
pub fn score_by_cost(channel: Channel, level: PriorityLevel) -> (SignalScore, f64) {
    match channel {
        Channel::Sms => {
            if level == PriorityLevel::Low {
                (SignalScore::new(-10, "SMS costly for low priority"), 0.05)
            } else {
                (SignalScore::NONE, 0.05)
            }
        }
        Channel::Email => (SignalScore::new(15, "Email very cost-effective"), 0.0006),
        Channel::WhatsApp => (SignalScore::new(10, "WhatsApp affordable"), 0.01),
        Channel::Telegram => (SignalScore::new(20, "Telegram free"), 0.0),
    }
}

/// Inside quiet hours, intrusive channels are penalized and email rewarded.
pub fn score_by_quiet_hours(
    channel: Channel,
    preferences: &ChannelPreferences,
    quiet: bool,
) -> SignalScore {
    if !quiet {
        return SignalScore::NONE;
    }

    match channel {
        Channel::Sms if !preferences.allow_sms_during_quiet_hours => {
            SignalScore::new(-30, "Quiet hours - SMS intrusive")
        }
        Channel::Email => SignalScore::new(10, "Email respectful during quiet hours"),
        _ => SignalScore::NONE,
    }
}

/// Message-type affinity (appointments lean SMS, marketing leans email).
pub fn score_by_message_type(channel: Channel, message_type: MessageType) -> SignalScore {
    match (message_type, channel) {
        (MessageType::Appointment, Channel::Sms) => {
            SignalScore::new(15, "SMS excellent for appointments")
        }
        (MessageType::Marketing, Channel::Email) => {
            SignalScore::new(20, "Email ideal for marketing")
        }
        (MessageType::Marketing, Channel::Sms) => {
            SignalScore::new(-15, "SMS intrusive for marketing")
        }
        (MessageType::Notification, Channel::Sms | Channel::WhatsApp) => {
            SignalScore::new(15, "Instant channel good for notifications")
        }
        _ => SignalScore::NONE,
    }
}

/// Score one channel for one message at the given clock reading.
///
/// Folds the seven signals in a fixed order (preference, urgency, content,
/// length, cost, quiet hours, message type). The raw sum is normalized to
/// `[0, 1]` by dividing by [`SCORE_DIVISOR`] and clamping. Cost and delivery
/// time come only from their respective signals; they are not summed.
pub fn score_channel(
    channel: Channel,
    context: &MessageContext,
    content: &MessageContent,
    now: NaiveTime,
) -> ChannelEvaluation {
    let (priority, delivery_time_seconds) = score_by_priority(channel, context.priority.level);
    let (cost_signal, cost) = score_by_cost(channel, context.priority.level);
    let quiet = is_quiet_hours(&context.preferences, now);

    let signals = [
        score_by_user_preference(channel, &context.preferences),
        priority,
        score_by_content(channel, content),
        score_by_message_length(channel, content.body.chars().count()),
        cost_signal,
        score_by_quiet_hours(channel, &context.preferences, quiet),
        score_by_message_type(channel, context.message_type),
    ];

    let raw: i32 = signals.iter().map(|s| s.points).sum();
    let reasons = signals
        .iter()
        .filter_map(|s| s.reason.map(str::to_string))
        .collect();

    ChannelEvaluation {
        channel,
        score: (f64::from(raw) / SCORE_DIVISOR).clamp(0.0, 1.0),
        reasons,
        cost,
        delivery_time_seconds,
    }
}
