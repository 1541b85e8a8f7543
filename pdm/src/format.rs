//! Display formatting for pod status fields.

use crate::types::PodStatus;
use time::{OffsetDateTime, UtcOffset};

/// Renders minutes since activation as `"<d>d <h>h <m>m"`.
#[must_use]
pub fn format_time_active(minutes: u64) -> String {
    let days = minutes / 1440;
    let rest = minutes % 1440;
    let hours = rest / 60;
    let minutes = rest % 60;
    format!("{days}d {hours}h {minutes}m")
}

/// Renders a status timestamp for the panel header.
///
/// Month name, then the weekday as a number of days from Sunday (0-6), then
/// the time truncated to `HH:MM:SS`.
#[must_use]
pub fn format_last_updated(ts: OffsetDateTime) -> String {
    format!(
        "{} {}, {:02}:{:02}:{:02}",
        ts.month(),
        ts.weekday().number_days_from_sunday(),
        ts.hour(),
        ts.minute(),
        ts.second()
    )
}

/// Human-readable strings derived from the most recent [`PodStatus`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatted {
    pub last_updated: String,
    pub time_active: String,
    pub bolus_state: String,
    pub basal_state: String,
}

impl Formatted {
    /// Recomputes the display strings from a fresh status record.
    ///
    /// State codes the panel does not know about leave the previously
    /// displayed label in place.
    pub fn update(&mut self, pod: &PodStatus) {
        self.last_updated = format_last_updated(to_local(pod.last_updated));
        self.time_active = format_time_active(pod.minutes_since_activation);
        if let Some(state) = pod.bolus() {
            self.bolus_state = state.label().to_string();
        }
        if let Some(state) = pod.basal() {
            self.basal_state = state.label().to_string();
        }
    }
}

/// Shift a timestamp into local time when the local offset is known.
fn to_local(ts: OffsetDateTime) -> OffsetDateTime {
    UtcOffset::current_local_offset().map_or_else(|_| ts, |offset| ts.to_offset(offset))
}
