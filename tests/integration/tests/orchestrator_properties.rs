//! Property-style checks across the public orchestrator API.

use chrono::NaiveTime;
use omniroute_channels::ChannelOrchestrator;
use omniroute_core::{
    Channel, ChannelPreferences, MessageContent, MessageContext, MessagePriority, MessageType,
    PriorityLevel,
};
use omniroute_integration_tests::{init_test_logging, MockSender};
use std::sync::Arc;

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn full_orchestrator() -> ChannelOrchestrator {
    let mut builder = ChannelOrchestrator::builder();
    for channel in Channel::ALL {
        builder = builder.sender(Arc::new(MockSender::succeeding(channel)));
    }
    builder.build()
}

fn fully_reachable(tenant: &str, recipient: &str) -> MessageContext {
    MessageContext::new(tenant, recipient)
        .with_phone("+15550001111")
        .with_email("jo@example.com")
        .with_whatsapp("+15550001111")
        .with_telegram("@jo")
}

#[test]
fn confidence_stays_in_unit_interval_across_the_grid() {
    init_test_logging();
    let orchestrator = full_orchestrator();

    let priorities = [
        PriorityLevel::Urgent,
        PriorityLevel::High,
        PriorityLevel::Normal,
        PriorityLevel::Low,
    ];
    let types = [
        MessageType::Appointment,
        MessageType::Notification,
        MessageType::Marketing,
        MessageType::Survey,
        MessageType::General,
    ];
    let contents = [
        MessageContent::new("short"),
        MessageContent::new("x".repeat(400)).with_html("<p>rich</p>"),
    ];
    let clocks = [at(12, 0), at(23, 30)];

    for level in priorities {
        for message_type in types {
            for content in &contents {
                for now in clocks {
                    let context = fully_reachable("t1", "r1")
                        .with_priority(MessagePriority::new(level))
                        .with_type(message_type)
                        .with_preferences(
                            ChannelPreferences::new()
                                .prefer(Channel::Sms)
                                .quiet_hours("22:00", "08:00"),
                        );

                    let decision = orchestrator
                        .decide_channel_at(&context, content, now)
                        .unwrap();
                    assert!((0.0..=1.0).contains(&decision.confidence));
                    for alt in &decision.alternative_channels {
                        assert!((0.0..=1.0).contains(&alt.confidence));
                    }
                    assert!(decision.alternative_channels.len() <= 2);
                }
            }
        }
    }
}

#[test]
fn preferring_a_channel_can_flip_the_ranking() {
    init_test_logging();
    let orchestrator = full_orchestrator();
    let content = MessageContent::new("your order is ready");

    // Normal priority, general type: email (20 + 15) beats sms (15).
    let neutral = fully_reachable("t1", "r1");
    let decision = orchestrator
        .decide_channel_at(&neutral, &content, at(12, 0))
        .unwrap();
    assert_eq!(decision.channel, Channel::Email);

    // Preferring sms adds +30: sms (45) now beats email (35).
    let preferring =
        fully_reachable("t1", "r1").with_preferences(ChannelPreferences::new().prefer(Channel::Sms));
    let decision = orchestrator
        .decide_channel_at(&preferring, &content, at(12, 0))
        .unwrap();
    assert_eq!(decision.channel, Channel::Sms);
}

#[tokio::test]
async fn broadcast_fans_out_per_recipient() {
    init_test_logging();
    let sms = Arc::new(MockSender::succeeding(Channel::Sms));
    let email = Arc::new(MockSender::succeeding(Channel::Email));
    let orchestrator = ChannelOrchestrator::builder()
        .sender(sms.clone())
        .sender(email.clone())
        .build();

    let contexts = vec![
        MessageContext::new("t1", "r1").with_phone("+15550001111"),
        MessageContext::new("t1", "r2").with_email("a@example.com"),
        MessageContext::new("t1", "r3"), // unreachable
        MessageContext::new("t1", "r4").with_email("b@example.com"),
    ];
    let content = MessageContent::new("maintenance window tonight");

    let results = orchestrator.broadcast_message(&contexts, &content).await;

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].channel, Some(Channel::Sms));
    assert_eq!(results[1].channel, Some(Channel::Email));
    assert!(!results[2].success);
    assert_eq!(results[3].channel, Some(Channel::Email));
    assert_eq!(sms.calls(), 1);
    assert_eq!(email.calls(), 2);
}
