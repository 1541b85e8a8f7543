use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;

/// Response envelope used by every PDM endpoint.
///
/// The service always answers HTTP 200 with `success` indicating whether the
/// command went through; the payload lives in `result` and failures carry a
/// message in `error`.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub error: Option<String>,
}

/// Pod status record as reported by the PDM service.
///
/// Replaced wholesale on every successful call; the service returns the full
/// record from command endpoints too, not just from `pdm/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodStatus {
    /// Unix timestamp (in seconds) of the last status update from the pod
    #[serde(rename = "lastUpdated", with = "time::serde::timestamp")]
    pub last_updated: OffsetDateTime,
    /// Minutes elapsed since the pod was activated
    pub minutes_since_activation: u64,
    /// Bolus delivery state code; see [`BolusState::from_code`]
    #[serde(rename = "bolusState")]
    pub bolus_state: i64,
    /// Basal delivery state code; see [`BasalState::from_code`]
    #[serde(rename = "basalState")]
    pub basal_state: i64,
    /// Remaining insulin in units (reads above 50U are reported as 50+)
    #[serde(default)]
    pub reservoir: f64,
    /// Pod lifecycle progress code
    #[serde(default)]
    pub progress: i64,
    /// Whether the pod has faulted
    #[serde(default)]
    pub faulted: bool,
    /// Total insulin delivered in units
    #[serde(rename = "totalInsulin", default)]
    pub total_insulin: f64,
    /// Insulin canceled before delivery in units
    #[serde(rename = "canceledInsulin", default)]
    pub canceled_insulin: f64,
    /// Pod lot number
    #[serde(default)]
    pub lot: u64,
    /// Pod serial (tid)
    #[serde(default)]
    pub tid: u64,

    /// Catch-all for any additional fields from the service
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl PodStatus {
    /// Decoded bolus state, if the code is one the panel knows about.
    #[must_use]
    pub const fn bolus(&self) -> Option<BolusState> {
        BolusState::from_code(self.bolus_state)
    }

    /// Decoded basal state, if the code is one the panel knows about.
    #[must_use]
    pub const fn basal(&self) -> Option<BasalState> {
        BasalState::from_code(self.basal_state)
    }
}

/// Bolus delivery states reported by the pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BolusState {
    NotRunning,
    Extended,
    Immediate,
}

impl BolusState {
    /// Decodes the wire code; unknown codes return `None` so callers can
    /// keep whatever they displayed last.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::NotRunning),
            1 => Some(Self::Extended),
            2 => Some(Self::Immediate),
            _ => None,
        }
    }

    /// Display label for this state.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotRunning => "Not running",
            Self::Extended => "Extended bolus active",
            Self::Immediate => "Immediate bolus active",
        }
    }
}

impl std::fmt::Display for BolusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Basal delivery states reported by the pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasalState {
    NotRunning,
    TempBasal,
    Program,
}

impl BasalState {
    /// Decodes the wire code; unknown codes return `None`.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::NotRunning),
            1 => Some(Self::TempBasal),
            2 => Some(Self::Program),
            _ => None,
        }
    }

    /// Display label for this state.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotRunning => "Not running",
            Self::TempBasal => "Temp. basal active",
            Self::Program => "Normal basal active",
        }
    }
}

impl std::fmt::Display for BasalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::{BasalState, BolusState};

    #[test]
    fn state_codes_map_to_labels() {
        assert_eq!(BolusState::from_code(0).unwrap().label(), "Not running");
        assert_eq!(
            BolusState::from_code(1).unwrap().label(),
            "Extended bolus active"
        );
        assert_eq!(
            BolusState::from_code(2).unwrap().label(),
            "Immediate bolus active"
        );
        assert_eq!(BasalState::from_code(0).unwrap().label(), "Not running");
        assert_eq!(
            BasalState::from_code(1).unwrap().label(),
            "Temp. basal active"
        );
        assert_eq!(
            BasalState::from_code(2).unwrap().label(),
            "Normal basal active"
        );
    }

    #[test]
    fn unknown_state_codes_decode_to_none() {
        assert!(BolusState::from_code(3).is_none());
        assert!(BolusState::from_code(-1).is_none());
        assert!(BasalState::from_code(7).is_none());
    }
}
