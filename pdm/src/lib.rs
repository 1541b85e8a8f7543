pub mod format;
pub mod types;

use crate::types::{ApiResponse, PodStatus};
use reqwest::Client;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("PDM error: {0}")]
    Api(String),
    #[error("PDM response reported success but carried no result")]
    MissingResult,
}

pub struct PdmClient {
    client: Client,
    base_url: String,
}

impl PdmClient {
    async fn get<T, U>(&self, endpoint: &str, query: &U) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
        U: serde::ser::Serialize,
    {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, endpoint))
            .query(&query)
            .send()
            .await?
            .error_for_status()?;
        let envelope: ApiResponse<T> = response.json().await?;
        if envelope.success {
            envelope.result.ok_or(Error::MissingResult)
        } else {
            Err(Error::Api(
                envelope.error.unwrap_or_else(|| "Unknown".to_string()),
            ))
        }
    }

    /// Creates a new `PdmClient` pointed at the service's default local
    /// address.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: "http://127.0.0.1:4444/".to_string(),
        }
    }

    /// Sets the base URL for this client. Expected to end with a slash.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Requests a fresh status update from the pod.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the response cannot be
    /// parsed, or the service reports a failure.
    pub async fn status(&self) -> Result<PodStatus, Error> {
        self.get("pdm/status", &()).await
    }

    /// Sets a temporary basal rate.
    ///
    /// # Arguments
    /// * `amount` - Basal rate in units per hour
    /// * `hours` - Duration of the temporary rate in hours
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the response cannot be
    /// parsed, or the service reports a failure.
    pub async fn set_temp_basal(&self, amount: f64, hours: f64) -> Result<PodStatus, Error> {
        let query = [
            ("amount", amount.to_string()),
            ("hours", hours.to_string()),
        ];
        self.get("pdm/settempbasal", &query).await
    }

    /// Cancels a running temporary basal, resuming the programmed schedule.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the response cannot be
    /// parsed, or the service reports a failure.
    pub async fn cancel_temp_basal(&self) -> Result<PodStatus, Error> {
        self.get("pdm/canceltempbasal", &()).await
    }

    /// Starts an immediate bolus.
    ///
    /// # Arguments
    /// * `amount` - Bolus amount in units
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the response cannot be
    /// parsed, or the service reports a failure.
    pub async fn bolus(&self, amount: f64) -> Result<PodStatus, Error> {
        let query = [("amount", amount.to_string())];
        self.get("pdm/bolus", &query).await
    }

    /// Cancels a running bolus. Takes no parameters; the service stops
    /// whatever bolus is in progress.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the response cannot be
    /// parsed, or the service reports a failure.
    pub async fn cancel_bolus(&self) -> Result<PodStatus, Error> {
        self.get("pdm/cancelbolus", &()).await
    }

    /// Retrieves the service API version as a `"major.minor"` string.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or the response cannot be
    /// parsed.
    pub async fn api_version(&self) -> Result<String, Error> {
        self.get("omnipy/version", &()).await
    }

    /// Retrieves the radio dongle battery level.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or the response cannot be
    /// parsed.
    pub async fn battery_level(&self) -> Result<String, Error> {
        self.get("rl/battery", &()).await
    }
}

impl Default for PdmClient {
    fn default() -> Self {
        Self::new()
    }
}
