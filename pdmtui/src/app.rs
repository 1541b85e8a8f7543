//! Main application state and logic.

use crate::state::{PanelInput, Request, StatusKind, StatusMessage, STATUS_TTL};
use pdm::format::Formatted;
use pdm::types::PodStatus;
use pdm::PdmClient;
use pdmconfig::PdmConfig;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

/// Main application state: the status panel view-model.
pub struct App {
    pub config: PdmConfig,
    pub client: PdmClient,
    pub request: Request,
    pub pod: Option<PodStatus>,
    pub formatted: Formatted,
    pub input: PanelInput,
    pub message: Option<StatusMessage>,
    pub last_refresh: Option<Instant>,
}

impl App {
    pub fn new(config: PdmConfig, client: PdmClient) -> Self {
        Self {
            config,
            client,
            request: Request::default(),
            pod: None,
            formatted: Formatted::default(),
            input: PanelInput::Normal,
            message: None,
            last_refresh: None,
        }
    }

    /// Folds a client response into the panel state.
    ///
    /// Success replaces the pod record, recomputes the formatted strings,
    /// and clears the pending request. Failure leaves all three untouched
    /// so the panel keeps showing the last good data.
    pub fn apply_response(
        &mut self,
        success_text: &str,
        result: Result<PodStatus, pdm::Error>,
    ) {
        match result {
            Ok(pod) => {
                self.formatted.update(&pod);
                self.pod = Some(pod);
                self.request.clear();
                self.input = PanelInput::Normal;
                self.set_message(StatusKind::Success, success_text.to_string());
            }
            Err(err) => {
                self.set_message(StatusKind::Error, err.to_string());
            }
        }
    }

    pub fn refresh_status(&mut self, runtime: &Runtime) {
        self.last_refresh = Some(Instant::now());
        let result = runtime.block_on(self.client.status());
        self.apply_response("Status refreshed", result);
    }

    /// Refreshes on the configured interval, but never while the user is
    /// typing a command.
    pub fn maybe_poll(&mut self, runtime: &Runtime) {
        if !matches!(self.input, PanelInput::Normal) {
            return;
        }
        let interval = self.config.tui.refresh_interval_secs;
        if interval == 0 {
            return;
        }
        let due = self
            .last_refresh
            .is_none_or(|at| at.elapsed() >= Duration::from_secs(interval));
        if due {
            self.refresh_status(runtime);
        }
    }

    pub fn submit_temp_basal(&mut self, buffer: &str, runtime: &Runtime) {
        let (rate, hours) = match parse_temp_basal(buffer) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.set_message(StatusKind::Error, err);
                return;
            }
        };
        self.request.temp_basal_rate = Some(rate);
        self.request.temp_basal_duration = Some(hours);
        let result = runtime.block_on(self.client.set_temp_basal(rate, hours));
        self.apply_response(&format!("Temp basal set: {rate} U/h for {hours}h"), result);
    }

    pub fn submit_bolus(&mut self, buffer: &str, runtime: &Runtime) {
        let amount = match parse_bolus(buffer) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.set_message(StatusKind::Error, err);
                return;
            }
        };
        self.request.bolus_amount = Some(amount);
        let result = runtime.block_on(self.client.bolus(amount));
        self.apply_response(&format!("Bolus started: {amount} U"), result);
    }

    pub fn cancel_bolus(&mut self, runtime: &Runtime) {
        let result = runtime.block_on(self.client.cancel_bolus());
        self.apply_response("Bolus canceled", result);
    }

    pub fn cancel_temp_basal(&mut self, runtime: &Runtime) {
        let result = runtime.block_on(self.client.cancel_temp_basal());
        self.apply_response("Temp basal canceled", result);
    }

    pub fn set_message(&mut self, kind: StatusKind, text: String) {
        self.message = Some(StatusMessage {
            kind,
            text,
            created: Instant::now(),
        });
    }

    pub fn clear_expired_message(&mut self) {
        if let Some(message) = &self.message {
            if message.created.elapsed() > STATUS_TTL {
                self.message = None;
            }
        }
    }
}

/// Parse input as "<rate> <hours>".
fn parse_temp_basal(input: &str) -> Result<(f64, f64), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Enter a rate and a duration".to_string());
    }
    let mut parts = trimmed.split_whitespace();
    let rate = parts
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| "Invalid rate".to_string())?;
    let hours = parts
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| "Invalid duration".to_string())?;
    if parts.next().is_some() {
        return Err("Expected exactly: <rate> <hours>".to_string());
    }
    Ok((rate, hours))
}

/// Parse input as "<amount>".
fn parse_bolus(input: &str) -> Result<f64, String> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid amount".to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse_bolus, parse_temp_basal, App};
    use crate::state::StatusKind;
    use pdm::types::PodStatus;
    use pdm::PdmClient;
    use pdmconfig::PdmConfig;
    use std::collections::HashMap;
    use time::OffsetDateTime;

    fn test_app() -> App {
        App::new(PdmConfig::default(), PdmClient::new())
    }

    fn pod(minutes: u64) -> PodStatus {
        PodStatus {
            last_updated: OffsetDateTime::UNIX_EPOCH,
            minutes_since_activation: minutes,
            bolus_state: 0,
            basal_state: 2,
            reservoir: 40.0,
            progress: 8,
            faulted: false,
            total_insulin: 0.0,
            canceled_insulin: 0.0,
            lot: 0,
            tid: 0,
            extra: HashMap::new(),
        }
    }

    #[test]
    fn success_replaces_pod_and_clears_request() {
        let mut app = test_app();
        app.request.bolus_amount = Some(1.5);
        app.apply_response("ok", Ok(pod(1505)));

        assert_eq!(app.request, crate::state::Request::default());
        assert_eq!(app.pod.as_ref().unwrap().minutes_since_activation, 1505);
        assert_eq!(app.formatted.time_active, "1d 1h 5m");
        assert_eq!(app.formatted.basal_state, "Normal basal active");
        assert!(matches!(
            app.message.as_ref().unwrap().kind,
            StatusKind::Success
        ));
    }

    #[test]
    fn failure_leaves_state_untouched() {
        let mut app = test_app();
        app.apply_response("ok", Ok(pod(1505)));
        app.request.temp_basal_rate = Some(0.5);

        app.apply_response("ok", Err(pdm::Error::Api("Pod is busy".to_string())));

        assert_eq!(app.pod.as_ref().unwrap().minutes_since_activation, 1505);
        assert_eq!(app.formatted.time_active, "1d 1h 5m");
        assert_eq!(app.request.temp_basal_rate, Some(0.5));
        assert!(matches!(
            app.message.as_ref().unwrap().kind,
            StatusKind::Error
        ));
    }

    #[test]
    fn parses_temp_basal_buffer() {
        assert_eq!(parse_temp_basal("0.5 2"), Ok((0.5, 2.0)));
        assert!(parse_temp_basal("").is_err());
        assert!(parse_temp_basal("0.5").is_err());
        assert!(parse_temp_basal("a b").is_err());
        assert!(parse_temp_basal("1 2 3").is_err());
    }

    #[test]
    fn parses_bolus_buffer() {
        assert_eq!(parse_bolus(" 1.35 "), Ok(1.35));
        assert!(parse_bolus("one").is_err());
    }
}
