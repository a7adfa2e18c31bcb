//! Tenant/recipient channel preferences.

use super::Channel;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating channel preferences.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// A quiet-hours bound is not a valid `HH:MM` string.
    #[error("invalid quiet-hours time: {0:?} (expected HH:MM)")]
    InvalidQuietHoursTime(String),
}

/// Tenant-level channel preferences for a recipient.
///
/// Loaded per request from tenant settings and treated as read-only input to
/// the orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelPreferences {
    /// Channels the recipient prefers, in order.
    #[serde(default)]
    pub preferred_channels: Vec<Channel>,

    /// Channels to try when the preferred ones fail, in order.
    #[serde(default)]
    pub fallback_channels: Vec<Channel>,

    /// Channels that must never be used for this recipient.
    #[serde(default)]
    pub disabled_channels: Vec<Channel>,

    /// Start of the do-not-disturb window, `"HH:MM"` local tenant time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_hours_start: Option<String>,

    /// End of the do-not-disturb window, `"HH:MM"` local tenant time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_hours_end: Option<String>,

    /// Allow SMS even inside the quiet-hours window.
    #[serde(default)]
    pub allow_sms_during_quiet_hours: bool,
}

impl ChannelPreferences {
    /// Create empty preferences (no preferred/disabled channels, no quiet hours).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a preferred channel.
    pub fn prefer(mut self, channel: Channel) -> Self {
        self.preferred_channels.push(channel);
        self
    }

    /// Add a fallback channel.
    pub fn fall_back_to(mut self, channel: Channel) -> Self {
        self.fallback_channels.push(channel);
        self
    }

    /// Disable a channel.
    pub fn disable(mut self, channel: Channel) -> Self {
        self.disabled_channels.push(channel);
        self
    }

    /// Set the quiet-hours window (`"HH:MM"` bounds, local tenant time).
    pub fn quiet_hours(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.quiet_hours_start = Some(start.into());
        self.quiet_hours_end = Some(end.into());
        self
    }

    /// Allow SMS during quiet hours.
    pub fn allow_sms_at_night(mut self) -> Self {
        self.allow_sms_during_quiet_hours = true;
        self
    }

    /// Whether a channel is disabled for this recipient.
    pub fn is_disabled(&self, channel: Channel) -> bool {
        self.disabled_channels.contains(&channel)
    }

    /// Whether a channel is among the preferred ones.
    pub fn is_preferred(&self, channel: Channel) -> bool {
        self.preferred_channels.contains(&channel)
    }

    /// The quiet-hours window as minutes since midnight, if configured and
    /// well-formed. Returns `None` when either bound is absent or malformed,
    /// which disables quiet hours.
    pub fn quiet_hours_window(&self) -> Option<(u16, u16)> {
        let start = parse_hhmm(self.quiet_hours_start.as_deref()?)?;
        let end = parse_hhmm(self.quiet_hours_end.as_deref()?)?;
        Some((start, end))
    }

    /// Validate the preferences, rejecting malformed quiet-hours bounds.
    pub fn validate(&self) -> Result<(), PreferenceError> {
        for bound in [&self.quiet_hours_start, &self.quiet_hours_end]
            .into_iter()
            .flatten()
        {
            if parse_hhmm(bound).is_none() {
                return Err(PreferenceError::InvalidQuietHoursTime(bound.clone()));
            }
        }
        Ok(())
    }
}

/// Parse an `"HH:MM"` string into minutes since midnight.
fn parse_hhmm(value: &str) -> Option<u16> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: u16 = hours.parse().ok()?;
    let minutes: u16 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}
