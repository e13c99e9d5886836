use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::Settings;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub(crate) const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";
pub(crate) const REPORTS_BUILT_TOTAL: &str = "final_reports_built_total";
pub(crate) const REPORT_ACTIVITIES_SKIPPED_TOTAL: &str = "final_report_activities_skipped_total";

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled || PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);

    metrics::describe_counter!(HTTP_REQUESTS_TOTAL, "HTTP responses by status code");
    metrics::describe_histogram!(HTTP_REQUEST_DURATION, "HTTP request latency");
    metrics::describe_counter!(REPORTS_BUILT_TOTAL, "Final grade reports by outcome");
    metrics::describe_counter!(
        REPORT_ACTIVITIES_SKIPPED_TOTAL,
        "Activities left out of a final report, by reason"
    );
    Ok(())
}

pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(|handle| handle.render())
}
