use pdm::PdmClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct PdmMock {
    pub server: MockServer,
}

impl PdmMock {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Mounts a successful envelope for `endpoint` with the given result.
    pub async fn mount_result(&self, endpoint: &str, result: Value) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "result": result })),
            )
            .mount(&self.server)
            .await;
    }

    /// Mounts a `success: false` envelope carrying an error message.
    pub async fn mount_error(&self, endpoint: &str, message: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": false, "error": message })),
            )
            .mount(&self.server)
            .await;
    }

    /// Mounts a bare HTTP status with no body.
    pub async fn mount_status_code(&self, endpoint: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub fn client(&self) -> PdmClient {
        PdmClient::new().with_base_url(format!("{}/", self.server.uri()))
    }

    /// A pod status record as the service reports it.
    pub fn pod_status() -> Value {
        json!({
            "lastUpdated": 1_541_060_544,
            "minutes_since_activation": 1505,
            "bolusState": 0,
            "basalState": 2,
            "reservoir": 42.15,
            "progress": 8,
            "faulted": false,
            "totalInsulin": 31.2,
            "canceledInsulin": 0.6,
            "lot": 44147,
            "tid": 1_160_445,
            "address": 521_455_633
        })
    }
}
