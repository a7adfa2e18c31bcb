//! Computes which channels are technically viable for a recipient.

use crate::traits::ChannelSender;
use omniroute_core::{Channel, MessageContext};
use std::collections::HashMap;
use std::sync::Arc;

/// Map of channel to its registered sender. Built once at orchestrator
/// construction and read-only thereafter.
pub type SenderMap = HashMap<Channel, Arc<dyn ChannelSender>>;

/// The channels a message can technically reach the recipient on.
///
/// A channel qualifies when a sender is registered for it, the context
/// carries a non-empty contact identifier for it, and the recipient has not
/// disabled it. An empty result is not an error by itself; the decision
/// engine turns it into one.
///
/// The result preserves the canonical channel order (sms, email, whatsapp,
/// telegram), which later acts as the tie-break order for equal scores.
pub fn available_channels(senders: &SenderMap, context: &MessageContext) -> Vec<Channel> {
    Channel::ALL
        .into_iter()
        .filter(|channel| senders.contains_key(channel))
        .filter(|channel| context.contact_for(*channel).is_some())
        .filter(|channel| !context.preferences.is_disabled(*channel))
        .collect()
}
