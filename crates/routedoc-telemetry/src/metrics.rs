//! Metrics for Routedoc.
//!
//! Counters are recorded through the `metrics` facade and are no-ops until a
//! recorder is installed. [`init_metrics`] installs a Prometheus recorder
//! whose output is available from [`render_metrics`].

use crate::error::TelemetryError;
use crate::TelemetryResult;
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Routes accepted by a registry.
pub const ROUTES_REGISTERED: &str = "routedoc_routes_registered_total";
/// Routes left out of a generated document.
pub const ROUTES_SKIPPED: &str = "routedoc_routes_skipped_total";
/// Documents generated.
pub const DOCUMENTS_GENERATED: &str = "routedoc_documents_generated_total";
/// Generation calls that returned a failure payload.
pub const GENERATION_FAILURES: &str = "routedoc_generation_failures_total";

/// Metrics configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Whether to install the Prometheus recorder.
    pub enabled: bool,
}

/// Installs the Prometheus recorder.
///
/// Installing twice is a no-op for the second call.
///
/// # Errors
///
/// Returns `TelemetryError::MetricsInit` if another recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled || METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let _ = METRICS_HANDLE.set(handle);
    register_metric_descriptions();

    Ok(())
}

/// Renders metrics in Prometheus format.
///
/// Returns `None` if metrics are not initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!(ROUTES_REGISTERED, "Routes accepted by a route registry");
    describe_counter!(ROUTES_SKIPPED, "Routes left out of a generated document, by reason");
    describe_counter!(DOCUMENTS_GENERATED, "OpenAPI documents generated");
    describe_counter!(GENERATION_FAILURES, "Document generation calls that failed");
}

/// Records an accepted route registration.
pub fn record_route_registered() {
    counter!(ROUTES_REGISTERED).increment(1);
}

/// Records a route that was left out of a document.
///
/// # Arguments
///
/// * `reason` - Skip reason label (e.g., "wildcard", "no_schema")
pub fn record_route_skipped(reason: &'static str) {
    counter!(ROUTES_SKIPPED, "reason" => reason).increment(1);
}

/// Records a successfully generated document.
pub fn record_document_generated() {
    counter!(DOCUMENTS_GENERATED).increment(1);
}

/// Records a failed generation call.
pub fn record_generation_failure() {
    counter!(GENERATION_FAILURES).increment(1);
}
