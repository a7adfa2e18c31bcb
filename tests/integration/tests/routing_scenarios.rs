//! End-to-end routing scenarios through the public orchestrator API.

use chrono::NaiveTime;
use omniroute_channels::{ChannelOrchestrator, RouteError};
use omniroute_core::{
    Channel, ChannelPreferences, MessageContent, MessageContext, MessagePriority, MessageType,
};
use omniroute_integration_tests::{init_test_logging, MockSender};
use std::sync::Arc;

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn scenario_a_urgent_appointment_over_sms_only() {
    init_test_logging();
    let orchestrator = ChannelOrchestrator::builder()
        .sender(Arc::new(MockSender::succeeding(Channel::Sms)))
        .sender(Arc::new(MockSender::succeeding(Channel::Email)))
        .build();

    let context = MessageContext::new("salon-42", "cust-7")
        .with_phone("+15550001111")
        .with_type(MessageType::Appointment)
        .with_priority(MessagePriority::urgent());
    let content = MessageContent::new("Reminder: appointment tomorrow at 3pm");

    let decision = orchestrator
        .decide_channel_at(&context, &content, at(12, 0))
        .unwrap();

    // Urgency +25, appointment affinity +15, no preference bonus.
    assert_eq!(decision.channel, Channel::Sms);
    assert_eq!(decision.confidence, 0.40);
    assert_eq!(decision.estimated_delivery_time_seconds, 10);
    assert!(decision.alternative_channels.is_empty());
}

#[test]
fn scenario_b_marketing_html_prefers_email_over_sms() {
    init_test_logging();
    let orchestrator = ChannelOrchestrator::builder()
        .sender(Arc::new(MockSender::succeeding(Channel::Sms)))
        .sender(Arc::new(MockSender::succeeding(Channel::Email)))
        .build();

    let context = MessageContext::new("salon-42", "cust-7")
        .with_phone("+15550001111")
        .with_email("jo@example.com")
        .with_type(MessageType::Marketing);
    let content =
        MessageContent::new("Our spring offers are live").with_html("<h1>Spring offers</h1>");

    let decision = orchestrator
        .decide_channel_at(&context, &content, at(12, 0))
        .unwrap();

    // Email: normal +20, rich content +25, cost +15, marketing +20 = 0.80.
    // SMS: normal +15, rich content -20, marketing -15 = -20, clamped to 0.
    assert_eq!(decision.channel, Channel::Email);
    assert_eq!(decision.confidence, 0.80);
    assert_eq!(decision.alternative_channels[0].channel, Channel::Sms);
    assert_eq!(decision.alternative_channels[0].confidence, 0.0);
}

#[test]
fn scenario_c_quiet_hours_demote_urgent_sms() {
    init_test_logging();
    let orchestrator = ChannelOrchestrator::builder()
        .sender(Arc::new(MockSender::succeeding(Channel::Sms)))
        .sender(Arc::new(MockSender::succeeding(Channel::Email)))
        .build();

    let context = MessageContext::new("salon-42", "cust-7")
        .with_phone("+15550001111")
        .with_email("jo@example.com")
        .with_priority(MessagePriority::urgent())
        .with_preferences(ChannelPreferences::new().quiet_hours("22:00", "08:00"));
    let content = MessageContent::new("Gate code changed to 4821");

    let decision = orchestrator
        .decide_channel_at(&context, &content, at(23, 0))
        .unwrap();

    // Full arithmetic, not rule of thumb:
    //   SMS:   urgent +25, quiet hours -30            = -5, clamped to 0.
    //   Email: urgent +5, cost +15, quiet hours +10   = 30 => 0.30.
    assert_eq!(decision.channel, Channel::Email);
    assert_eq!(decision.confidence, 0.30);
    assert_eq!(decision.alternative_channels[0].channel, Channel::Sms);
    assert_eq!(decision.alternative_channels[0].confidence, 0.0);
}

#[tokio::test]
async fn scenario_d_fallback_to_email_after_sms_outage() {
    init_test_logging();
    let sms = Arc::new(MockSender::failing(Channel::Sms));
    let email = Arc::new(MockSender::succeeding(Channel::Email));
    let orchestrator = ChannelOrchestrator::builder()
        .sender(sms.clone())
        .sender(email.clone())
        .build();

    let context = MessageContext::new("salon-42", "cust-7")
        .with_phone("+15550001111")
        .with_email("jo@example.com")
        .with_type(MessageType::Appointment)
        .with_priority(MessagePriority::urgent());
    let content = MessageContent::new("Reminder: appointment tomorrow at 3pm");

    let result = orchestrator
        .route_message_at(&context, &content, at(12, 0))
        .await;

    assert!(result.success);
    assert_eq!(result.channel, Some(Channel::Email));
    assert!(result.fallback_attempted);
    assert_eq!(result.fallback_channel, Some(Channel::Email));
    assert!(!result.message_id.is_empty());
    assert_eq!(sms.calls(), 1);
    assert_eq!(email.calls(), 1);
}

#[test]
fn no_contacts_yields_named_error() {
    init_test_logging();
    let orchestrator = ChannelOrchestrator::builder()
        .sender(Arc::new(MockSender::succeeding(Channel::Sms)))
        .sender(Arc::new(MockSender::succeeding(Channel::Email)))
        .build();

    let context = MessageContext::new("salon-42", "cust-7");
    let content = MessageContent::new("hello");

    let err = orchestrator
        .decide_channel_at(&context, &content, at(12, 0))
        .unwrap_err();
    assert!(matches!(err, RouteError::NoAvailableChannel { .. }));
    assert!(err.to_string().contains("cust-7"));
}

#[test]
fn decision_serializes_with_lowercase_channel_names() {
    init_test_logging();
    let orchestrator = ChannelOrchestrator::builder()
        .sender(Arc::new(MockSender::succeeding(Channel::WhatsApp)))
        .build();

    let context = MessageContext::new("salon-42", "cust-7").with_whatsapp("+15550001111");
    let decision = orchestrator
        .decide_channel_at(&context, &MessageContent::new("hi"), at(12, 0))
        .unwrap();

    let json = serde_json::to_value(&decision).unwrap();
    assert_eq!(json["channel"], "whatsapp");
    assert!(json["confidence"].is_number());
}
