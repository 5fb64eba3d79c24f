//! Runs in its own test binary: installs the global Prometheus recorder.

mod common;

use common::{TestApp, NOTIFICATIONS_PATH};
use donki_service::services::init_metrics;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn metrics_endpoint_exposes_request_counters() {
    init_metrics().expect("Failed to install Prometheus recorder");

    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NOTIFICATIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "messageType": "FLR" }])),
        )
        .mount(&upstream)
        .await;

    let app = TestApp::spawn_with_ops(&upstream).await;
    let ops = app.ops_address.clone().expect("ops listener not started");

    let response = app.get_notifications(Some("type=FLR")).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app
        .client
        .get(format!("{}/metrics", ops))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.unwrap();
    assert!(body.contains("donki_upstream_requests_total"), "{body}");
    assert!(body.contains("outcome=\"success\""), "{body}");
    assert!(body.contains("donki_notifications_enriched_total"), "{body}");
    assert!(body.contains("http_requests_total"), "{body}");
    assert!(body.contains("path=\"/donki-notifications\""), "{body}");
}
