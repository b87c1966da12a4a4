//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dashboard_reloads_total` (counter): reload attempts by outcome
//! - `dashboard_config_version` (gauge): version of the published snapshot
//! - `dashboard_watch_subscribe_attempts_total` (counter): watch (re)subscription attempts
//! - `dashboard_render_failures_total` (counter): pages that failed to render
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::reload::ReloadError;

/// Install the Prometheus exporter with its own scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_reload_success(version: u64) {
    ::metrics::counter!("dashboard_reloads_total", "outcome" => "success").increment(1);
    ::metrics::gauge!("dashboard_config_version").set(version as f64);
}

pub fn record_reload_failure(error: &ReloadError) {
    let outcome = match error {
        ReloadError::Config(crate::config::ConfigError::Read { .. }) => "read_error",
        ReloadError::Config(crate::config::ConfigError::Parse { .. }) => "parse_error",
        ReloadError::Template(_) => "template_error",
    };
    ::metrics::counter!("dashboard_reloads_total", "outcome" => outcome).increment(1);
}

pub fn record_subscribe_attempt() {
    ::metrics::counter!("dashboard_watch_subscribe_attempts_total").increment(1);
}

pub fn record_render_failure() {
    ::metrics::counter!("dashboard_render_failures_total").increment(1);
}
