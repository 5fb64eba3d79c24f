//! Application startup and lifecycle management.
//!
//! The public listener serves `/` and `/donki-notifications`. When an ops
//! port is configured, a second listener serves health and metrics so they
//! stay off the public surface.

use crate::config::DonkiConfig;
use crate::handlers::{
    health::{health_check, metrics_endpoint, readiness_check},
    notifications::{donki_notifications, index},
};
use crate::services::{Clock, NotificationFetcher, SystemClock};
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: NotificationFetcher,
}

/// Public routes. Anything else falls through to axum's 404.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/donki-notifications", get(donki_notifications))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Health, readiness and Prometheus metrics.
pub fn build_ops_router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    ops: Option<(u16, TcpListener)>,
    state: AppState,
}

impl Application {
    /// Build the application against the wall clock.
    pub async fn build(config: DonkiConfig) -> Result<Self, AppError> {
        Self::build_with_clock(config, Arc::new(SystemClock)).await
    }

    /// Build the application with an explicit clock (port 0 = random port).
    pub async fn build_with_clock(
        config: DonkiConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let fetcher = NotificationFetcher::new(&config.nasa, clock);
        tracing::info!(
            endpoint = %fetcher.endpoint(),
            "Initialized DONKI notification fetcher"
        );

        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        let ops = match config.common.ops_port {
            Some(port) => {
                let ops_addr = SocketAddr::from(([0, 0, 0, 0], port));
                let listener = TcpListener::bind(ops_addr).await.map_err(|e| {
                    tracing::error!("Failed to bind ops listener to {}: {}", ops_addr, e);
                    AppError::from(e)
                })?;
                Some((listener.local_addr()?.port(), listener))
            }
            None => None,
        };

        let state = AppState { fetcher };

        Ok(Self {
            http_port,
            http_listener,
            ops,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Get the ops port, if an ops listener was configured.
    pub fn ops_port(&self) -> Option<u16> {
        self.ops.as_ref().map(|(port, _)| *port)
    }

    /// Run the application until the process is terminated.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        tracing::info!("Server is running on http://localhost:{}", self.http_port);
        tracing::info!("Now waiting for a fetch request...");

        let Some((ops_port, ops_listener)) = self.ops else {
            return axum::serve(self.http_listener, router).await.map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            });
        };

        tracing::info!("Ops endpoints listening on port {}", ops_port);

        tokio::select! {
            result = axum::serve(self.http_listener, router).into_future() => {
                if let Err(e) = result {
                    tracing::error!("HTTP server error: {}", e);
                    return Err(e);
                }
            }
            result = axum::serve(ops_listener, build_ops_router()).into_future() => {
                if let Err(e) = result {
                    tracing::error!("Ops server error: {}", e);
                    return Err(e);
                }
            }
        }

        Ok(())
    }
}
