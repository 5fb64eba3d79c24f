//! Fetches today's notifications from NASA DONKI and enriches them.
//!
//! One upstream GET per call with `startDate = endDate = today`. No retries,
//! no caching and no client-side timeout beyond reqwest's default.

use crate::config::NasaConfig;
use crate::error::DonkiError;
use crate::models::{enrich, EnrichedNotification, RawNotification, DEFAULT_NOTIFICATION_TYPE};
use crate::services::clock::Clock;
use crate::services::metrics;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use service_core::observability::TracedClientExt;
use std::sync::Arc;
use std::time::Instant;

/// Everything that can go wrong talking to DONKI. Only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Built with the URL stripped; the query string carries the API key.
    #[error("request failed: {0}")]
    Request(reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        UpstreamError::Request(err.without_url())
    }
}

#[derive(Clone)]
pub struct NotificationFetcher {
    client: Client,
    endpoint: String,
    api_key: Secret<String>,
    clock: Arc<dyn Clock>,
}

impl NotificationFetcher {
    pub fn new(nasa: &NasaConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            client: Client::new(),
            endpoint: nasa.notifications_url(),
            api_key: nasa.api_key.clone(),
            clock,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch today's notifications of `message_type` (default `all`).
    ///
    /// The type is forwarded verbatim; DONKI decides whether it's valid.
    pub async fn fetch_notifications(
        &self,
        message_type: Option<&str>,
    ) -> Result<Vec<EnrichedNotification>, DonkiError> {
        let message_type = message_type.unwrap_or(DEFAULT_NOTIFICATION_TYPE);
        let today = self.clock.today_string();

        let started = Instant::now();
        let result = self.fetch_raw(&today, message_type).await;
        metrics::record_upstream_request(result.is_ok(), started.elapsed());

        match result {
            Ok(raw) => {
                let enriched: Vec<EnrichedNotification> = raw.into_iter().map(enrich).collect();
                metrics::record_enriched(enriched.len());
                Ok(enriched)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    message_type = %message_type,
                    date = %today,
                    "Error fetching DONKI data"
                );
                Err(DonkiError::RetrievalFailed)
            }
        }
    }

    async fn fetch_raw(
        &self,
        date: &str,
        message_type: &str,
    ) -> Result<Vec<RawNotification>, UpstreamError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            date = %date,
            message_type = %message_type,
            "Requesting DONKI notifications"
        );

        let response = self
            .client
            .traced_get(&self.endpoint)
            .query(&[
                ("startDate", date),
                ("endDate", date),
                ("type", message_type),
                ("api_key", self.api_key.expose_secret().as_str()),
            ])
            .send()
            .await
            .map_err(UpstreamError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let body = response
            .text()
            .await
            .map_err(UpstreamError::from_reqwest)?;
        // DONKI answers quiet days with an empty 200.
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::FixedClock;
    use chrono::NaiveDate;

    #[test]
    fn endpoint_comes_from_base_url() {
        let nasa = NasaConfig {
            api_key: Secret::new("test-key".into()),
            base_url: "http://localhost:9999/DONKI".into(),
        };
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()));
        let fetcher = NotificationFetcher::new(&nasa, clock);
        assert_eq!(fetcher.endpoint(), "http://localhost:9999/DONKI/notifications");
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_api_key() {
        // Reserve a port, then free it so the connect is refused.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let nasa = NasaConfig {
            api_key: Secret::new("SUPER-SECRET-KEY".into()),
            base_url: format!("http://127.0.0.1:{}/DONKI", port),
        };
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()));
        let fetcher = NotificationFetcher::new(&nasa, clock);

        let err = fetcher.fetch_raw("2026-10-17", "FLR").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Request(_)));

        let logged = err.to_string();
        assert!(!logged.contains("SUPER-SECRET-KEY"), "{logged}");
        assert!(!logged.contains("api_key"), "{logged}");
    }

    #[test]
    fn upstream_status_error_mentions_status() {
        let err = UpstreamError::Status {
            status: StatusCode::FORBIDDEN,
            body: "API_KEY_INVALID".into(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected status 403 Forbidden: API_KEY_INVALID"
        );
    }
}
