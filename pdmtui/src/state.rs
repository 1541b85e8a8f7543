//! State types for the TUI application.

use std::time::{Duration, Instant};

pub const STATUS_TTL: Duration = Duration::from_secs(4);
pub const TICK_RATE: Duration = Duration::from_millis(200);

/// Input mode for the panel.
#[derive(Debug)]
pub enum PanelInput {
    Normal,
    TempBasal { buffer: String },
    Bolus { buffer: String },
}

impl PanelInput {
    /// Prompt text shown in the footer while this mode is active.
    pub fn prompt(&self) -> Option<String> {
        match self {
            Self::Normal => None,
            Self::TempBasal { buffer } => Some(format!("Temp basal <rate> <hours>: {buffer}")),
            Self::Bolus { buffer } => Some(format!("Bolus <amount>: {buffer}")),
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// A status message with expiration tracking.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub created: Instant,
}

/// Pending user-entered command parameters, cleared after each successful
/// API call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Request {
    pub temp_basal_rate: Option<f64>,
    pub temp_basal_duration: Option<f64>,
    pub bolus_amount: Option<f64>,
}

impl Request {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
