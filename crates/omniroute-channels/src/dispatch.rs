//! Dispatch coordination: send on the decided channel, fall back once.

use crate::availability::SenderMap;
use crate::decision::{decide, RoutingDecision};
use crate::error::{RouteError, SenderError};
use crate::traits::{ChannelSender, SendReceipt};
use crate::Result;
use chrono::{Local, NaiveTime};
use futures::future::join_all;
use omniroute_core::{Channel, MessageContent, MessageContext};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Configuration for dispatch.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum time to wait for a single sender invocation. An elapsed
    /// timeout counts as a sender failure and is eligible for fallback.
    pub send_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            send_timeout: Duration::from_secs(30),
        }
    }
}

/// Observer invoked after every completed `route_message` call.
///
/// The orchestrator keeps no delivery history itself; hosting applications
/// that want an activity log hook in here.
pub trait DeliveryObserver: Send + Sync {
    /// Called once per send with the terminal result.
    fn on_result(&self, context: &MessageContext, result: &SendResult);
}

/// Terminal outcome of one `route_message` call.
#[derive(Debug, Clone, Serialize)]
pub struct SendResult {
    /// Whether the message was handed off to a provider.
    pub success: bool,

    /// The channel involved. `None` when routing itself failed.
    ///
    /// Note: after a successful fallback this is the channel that actually
    /// delivered, not the primary that failed; the failed primary is only
    /// implied by `fallback_attempted`. Downstream consumers depend on this
    /// labeling, so confirm with them before changing it.
    pub channel: Option<Channel>,

    /// Provider-assigned message ID. Empty on failure.
    pub message_id: String,

    /// Terminal status ("sent", "queued", "failed", ...).
    pub status: String,

    /// Human-readable error naming the attempted channel(s).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Whether a fallback send was attempted.
    pub fallback_attempted: bool,

    /// The fallback channel, when one was attempted and succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_channel: Option<Channel>,
}

impl SendResult {
    fn sent(channel: Channel, receipt: SendReceipt) -> Self {
        Self {
            success: true,
            channel: Some(channel),
            message_id: receipt.message_id,
            status: receipt.status,
            error: None,
            fallback_attempted: false,
            fallback_channel: None,
        }
    }

    fn sent_via_fallback(channel: Channel, receipt: SendReceipt) -> Self {
        Self {
            fallback_attempted: true,
            fallback_channel: Some(channel),
            ..Self::sent(channel, receipt)
        }
    }

    fn failed(channel: Channel, error: String) -> Self {
        Self {
            success: false,
            channel: Some(channel),
            message_id: String::new(),
            status: "failed".to_string(),
            error: Some(error),
            fallback_attempted: false,
            fallback_channel: None,
        }
    }

    fn not_routed(error: RouteError) -> Self {
        Self {
            success: false,
            channel: None,
            message_id: String::new(),
            status: "failed".to_string(),
            error: Some(error.to_string()),
            fallback_attempted: false,
            fallback_channel: None,
        }
    }
}

/// The channel orchestrator.
///
/// Holds the construction-time sender map (read-only afterwards, so no
/// locking) and coordinates decide → send → fallback for each message.
/// Multiple orchestrators with different sender sets can coexist in one
/// process.
pub struct ChannelOrchestrator {
    senders: SenderMap,
    config: DispatchConfig,
    observer: Option<Arc<dyn DeliveryObserver>>,
}

/// Builder for [`ChannelOrchestrator`].
#[derive(Default)]
pub struct OrchestratorBuilder {
    senders: SenderMap,
    config: DispatchConfig,
    observer: Option<Arc<dyn DeliveryObserver>>,
}

impl OrchestratorBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sender under the channel it reports.
    pub fn sender(mut self, sender: Arc<dyn ChannelSender>) -> Self {
        self.senders.insert(sender.channel(), sender);
        self
    }

    /// Override the dispatch configuration.
    pub fn config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a delivery observer.
    pub fn observer(mut self, observer: Arc<dyn DeliveryObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the orchestrator.
    pub fn build(self) -> ChannelOrchestrator {
        ChannelOrchestrator {
            senders: self.senders,
            config: self.config,
            observer: self.observer,
        }
    }
}

impl ChannelOrchestrator {
    /// Start building an orchestrator.
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Decide the best channel for a message at the current local time.
    pub fn decide_channel(
        &self,
        context: &MessageContext,
        content: &MessageContent,
    ) -> Result<RoutingDecision> {
        self.decide_channel_at(context, content, Local::now().time())
    }

    /// Decide the best channel at a fixed clock reading.
    pub fn decide_channel_at(
        &self,
        context: &MessageContext,
        content: &MessageContent,
        now: NaiveTime,
    ) -> Result<RoutingDecision> {
        decide(&self.senders, context, content, now)
    }

    /// Route a message: decide, send, fall back once on failure.
    ///
    /// Never returns an error; every failure mode is captured in the
    /// returned [`SendResult`].
    pub async fn route_message(
        &self,
        context: &MessageContext,
        content: &MessageContent,
    ) -> SendResult {
        self.route_message_at(context, content, Local::now().time())
            .await
    }

    /// Route a message at a fixed clock reading.
    pub async fn route_message_at(
        &self,
        context: &MessageContext,
        content: &MessageContent,
        now: NaiveTime,
    ) -> SendResult {
        let result = self.dispatch(context, content, now).await;
        if let Some(observer) = &self.observer {
            observer.on_result(context, &result);
        }
        result
    }

    /// Route the same content to many recipients concurrently.
    ///
    /// Pure fan-out over independent `route_message` calls; the result order
    /// matches the input order. Concurrency limits and per-tenant rate
    /// limits are the caller's responsibility.
    pub async fn broadcast_message(
        &self,
        contexts: &[MessageContext],
        content: &MessageContent,
    ) -> Vec<SendResult> {
        join_all(
            contexts
                .iter()
                .map(|context| self.route_message(context, content)),
        )
        .await
    }

    async fn dispatch(
        &self,
        context: &MessageContext,
        content: &MessageContent,
        now: NaiveTime,
    ) -> SendResult {
        let decision = match self.decide_channel_at(context, content, now) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(
                    recipient = %context.recipient_id,
                    "routing failed: {}", e
                );
                return SendResult::not_routed(e);
            }
        };

        info!(
            channel = %decision.channel,
            confidence = decision.confidence,
            recipient = %context.recipient_id,
            "routing message"
        );
        debug!(reason = %decision.reason, "routing justification");

        let primary_error = match self.attempt_send(decision.channel, context, content).await {
            Ok(receipt) => return SendResult::sent(decision.channel, receipt),
            Err(e) => {
                error!(channel = %decision.channel, "send failed: {}", e);
                e
            }
        };

        // Single fallback hop: only the first alternative, never a cascade.
        let Some(fallback) = decision.alternative_channels.first() else {
            return SendResult::failed(decision.channel, primary_error.to_string());
        };

        info!(channel = %fallback.channel, "attempting fallback");
        match self.attempt_send(fallback.channel, context, content).await {
            Ok(receipt) => SendResult::sent_via_fallback(fallback.channel, receipt),
            Err(fallback_error) => {
                error!(channel = %fallback.channel, "fallback failed: {}", fallback_error);
                SendResult::failed(
                    decision.channel,
                    format!(
                        "primary and fallback channels failed: {}; {}",
                        primary_error, fallback_error
                    ),
                )
            }
        }
    }

    async fn attempt_send(
        &self,
        channel: Channel,
        context: &MessageContext,
        content: &MessageContent,
    ) -> std::result::Result<SendReceipt, SenderError> {
        // The decision engine only picks channels with a registered sender,
        // so a miss here is a defect, not a runtime path.
        let sender = self
            .senders
            .get(&channel)
            .ok_or_else(|| SenderError::transport(channel, "no sender registered"))?;

        match tokio::time::timeout(self.config.send_timeout, sender.send(context, content)).await {
            Ok(result) => result,
            Err(_) => Err(SenderError::Timeout {
                channel,
                seconds: self.config.send_timeout.as_secs(),
            }),
        }
    }
}
