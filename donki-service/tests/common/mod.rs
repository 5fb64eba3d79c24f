#![allow(dead_code)]

use chrono::NaiveDate;
use donki_service::config::{DonkiConfig, NasaConfig};
use donki_service::services::FixedClock;
use donki_service::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-nasa-key";
pub const TEST_DATE: &str = "2026-10-17";
pub const NOTIFICATIONS_PATH: &str = "/DONKI/notifications";

pub struct TestApp {
    pub address: String,
    pub ops_address: Option<String>,
    pub client: reqwest::Client,
}

fn test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()))
}

impl TestApp {
    /// Spawn the app with DONKI pointed at `upstream`.
    pub async fn spawn(upstream: &MockServer) -> Self {
        Self::spawn_with_base_url(format!("{}/DONKI", upstream.uri()), false).await
    }

    /// Spawn the app with the ops listener enabled.
    pub async fn spawn_with_ops(upstream: &MockServer) -> Self {
        Self::spawn_with_base_url(format!("{}/DONKI", upstream.uri()), true).await
    }

    pub async fn spawn_with_base_url(base_url: String, with_ops: bool) -> Self {
        let config = DonkiConfig {
            common: CoreConfig {
                port: 0,
                ops_port: with_ops.then_some(0),
                ..CoreConfig::default()
            },
            nasa: NasaConfig {
                api_key: Secret::new(TEST_API_KEY.to_string()),
                base_url,
            },
        };

        let app = Application::build_with_clock(config, test_clock())
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.http_port());
        let ops_address = app
            .ops_port()
            .map(|port| format!("http://127.0.0.1:{}", port));

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build test client");

        // Wait for the server to accept requests
        for _ in 0..50 {
            if client.get(&address).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Self {
            address,
            ops_address,
            client,
        }
    }

    pub async fn get_notifications(&self, query: Option<&str>) -> reqwest::Response {
        let url = match query {
            Some(q) => format!("{}/donki-notifications?{}", self.address, q),
            None => format!("{}/donki-notifications", self.address),
        };

        self.client
            .get(url)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
