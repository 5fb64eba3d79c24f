use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() -> Result<(), BuildError> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    METRICS_HANDLE.get_or_init(|| handle);
    Ok(())
}

/// Prometheus text exposition, or `None` when no recorder is installed.
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

pub fn record_upstream_request(success: bool, elapsed: Duration) {
    let outcome = if success { "success" } else { "failure" };
    counter!("donki_upstream_requests_total", "outcome" => outcome).increment(1);
    histogram!("donki_upstream_request_duration_seconds", "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}

pub fn record_enriched(count: usize) {
    counter!("donki_notifications_enriched_total").increment(count as u64);
}
