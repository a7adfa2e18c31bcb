//! Routing decisions: rank the viable channels and pick a winner.

use crate::availability::{available_channels, SenderMap};
use crate::error::RouteError;
use crate::scoring::{score_channel, ChannelEvaluation};
use chrono::NaiveTime;
use omniroute_core::{Channel, MessageContent, MessageContext};
use serde::Serialize;
use tracing::debug;

/// A ranked alternative to the chosen channel.
#[derive(Debug, Clone, Serialize)]
pub struct AlternativeChannel {
    /// The alternative channel.
    pub channel: Channel,

    /// Joined justifications for this ranking.
    pub reason: String,

    /// Normalized score in `[0, 1]`.
    pub confidence: f64,
}

/// The orchestrator's chosen channel plus ranked alternatives for one message.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingDecision {
    /// The winning channel. Always a member of the availability set computed
    /// for the context.
    pub channel: Channel,

    /// Joined justifications for the winner (separator `"; "`).
    pub reason: String,

    /// Normalized score of the winner in `[0, 1]`.
    pub confidence: f64,

    /// Up to two ranked alternatives.
    pub alternative_channels: Vec<AlternativeChannel>,

    /// Estimated monetary cost of one send on the winning channel.
    pub estimated_cost: f64,

    /// Estimated delivery latency on the winning channel, in seconds.
    pub estimated_delivery_time_seconds: u32,
}

/// Score every available channel and rank them into a decision.
///
/// Channels are scored independently and sorted by descending score with a
/// stable sort, so equal scores resolve to the availability order (sms,
/// email, whatsapp, telegram). Fails when no channel is available.
pub(crate) fn decide(
    senders: &SenderMap,
    context: &MessageContext,
    content: &MessageContent,
    now: NaiveTime,
) -> Result<RoutingDecision, RouteError> {
    let available = available_channels(senders, context);

    let mut evaluations: Vec<ChannelEvaluation> = available
        .into_iter()
        .map(|channel| score_channel(channel, context, content, now))
        .collect();
    evaluations.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut ranked = evaluations.into_iter();
    let Some(winner) = ranked.next() else {
        return Err(RouteError::NoAvailableChannel {
            recipient: context.recipient_id.clone(),
        });
    };

    let alternatives: Vec<AlternativeChannel> = ranked
        .take(2)
        .map(|eval| AlternativeChannel {
            channel: eval.channel,
            reason: eval.reasons.join("; "),
            confidence: eval.score,
        })
        .collect();

    debug!(
        channel = %winner.channel,
        confidence = winner.score,
        alternatives = alternatives.len(),
        "ranked channels for recipient {}",
        context.recipient_id
    );

    Ok(RoutingDecision {
        channel: winner.channel,
        reason: winner.reasons.join("; "),
        confidence: winner.score,
        alternative_channels: alternatives,
        estimated_cost: winner.cost,
        estimated_delivery_time_seconds: winner.delivery_time_seconds,
    })
}
