//! Quiet-hours evaluation.

use chrono::{NaiveTime, Timelike};
use omniroute_core::ChannelPreferences;

/// Whether `now` falls inside the recipient's do-not-disturb window.
///
/// Quiet hours are disabled when either bound is absent or malformed. A
/// window whose start is later than its end crosses midnight (e.g.
/// 22:00–08:00) and covers both the late evening and the early morning.
///
/// This is a pure function of the clock reading and must be re-evaluated on
/// every scoring call: decisions near the boundary minutes have to reflect
/// the current time.
pub fn is_quiet_hours(preferences: &ChannelPreferences, now: NaiveTime) -> bool {
    let Some((start, end)) = preferences.quiet_hours_window() else {
        return false;
    };

    let now = (now.hour() * 60 + now.minute()) as u16;
    if start <= end {
        start <= now && now <= end
    } else {
        now >= start || now <= end
    }
}
