mod common;

use common::mock_server::PdmMock;
use pdm::Error;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_error_envelope_maps_to_api_error() {
    let mock = PdmMock::start().await;
    mock.mount_error("/pdm/bolus", "Pod is not active").await;

    let client = mock.client();
    let err = client.bolus(1.0).await.unwrap_err();

    match err {
        Error::Api(message) => assert_eq!(message, "Pod is not active"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_200_maps_to_http_error() {
    let mock = PdmMock::start().await;
    mock.mount_status_code("/pdm/status", 500).await;

    let client = mock.client();
    let err = client.status().await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_success_without_result_is_an_error() {
    let mock = PdmMock::start().await;
    Mock::given(method("GET"))
        .and(path("/pdm/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
        )
        .mount(&mock.server)
        .await;

    let client = mock.client();
    let err = client.status().await.unwrap_err();
    assert!(matches!(err, Error::MissingResult));
}

#[tokio::test]
async fn test_malformed_result_is_an_error() {
    let mock = PdmMock::start().await;
    mock.mount_result("/pdm/status", serde_json::json!({ "bolusState": "nope" }))
        .await;

    let client = mock.client();
    assert!(client.status().await.is_err());
}
