//! Pipeline metrics, grouped by stage.
//!
//! Recording is always on; values only leave the process when
//! [`init_metrics`] installed the Prometheus exporter.

use crate::constants::METRICS_ADDR_ENV;
use std::net::SocketAddr;
use std::sync::Once;
use tracing::{info, warn};

static INIT: Once = Once::new();

/// Install the Prometheus HTTP exporter if `ADDON_CATALOGUE_METRICS_ADDR` is set.
///
/// Idempotent. Returns whether an exporter is listening after the call.
pub fn init_metrics() -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        let addr_str = match std::env::var(METRICS_ADDR_ENV) {
            Ok(v) if !v.trim().is_empty() => v,
            _ => return,
        };
        let addr: SocketAddr = match addr_str.parse() {
            Ok(addr) => addr,
            Err(e) => {
                warn!("Invalid metrics addr '{}': {}", addr_str, e);
                return;
            }
        };
        match metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
        {
            Ok(()) => {
                info!("Prometheus exporter listening at http://{}/metrics", addr);
                installed = true;
            }
            Err(e) => warn!("Failed to install Prometheus exporter: {}", e),
        }
    });
    installed
}

pub mod fetch {
    /// Record the size of one fetched catalogue
    pub fn catalogue_fetched(catalogue: &'static str, records: usize) {
        ::metrics::gauge!("addon_catalogue_fetched_records", "catalogue" => catalogue).set(records as f64);
    }
}

pub mod normalize {
    use crate::normalize::Contribution;
    use crate::types::Source;

    /// Record one normalized catalogue entry and what it produced
    pub fn record_normalized(source: Source, contribution: &Contribution) {
        let source = source.name();
        ::metrics::counter!("addon_catalogue_normalized_total", "source" => source).increment(1);
        ::metrics::counter!("addon_catalogue_folder_records_total", "source" => source)
            .increment(contribution.folders.len() as u64);
        ::metrics::counter!("addon_catalogue_name_records_total", "source" => source)
            .increment(contribution.names.len() as u64);
    }
}

pub mod build {
    /// Record the sizes of the final datasets
    pub fn datasets_built(slugs: usize, folders: usize, names: usize) {
        ::metrics::gauge!("addon_catalogue_dataset_entries", "dataset" => "slugs").set(slugs as f64);
        ::metrics::gauge!("addon_catalogue_dataset_entries", "dataset" => "folders").set(folders as f64);
        ::metrics::gauge!("addon_catalogue_dataset_entries", "dataset" => "names").set(names as f64);
    }
}

pub mod publish {
    pub fn artifact_published(artifact: &str, bytes: usize) {
        ::metrics::counter!("addon_catalogue_artifacts_published_total", "artifact" => artifact.to_string())
            .increment(1);
        ::metrics::histogram!("addon_catalogue_artifact_bytes").record(bytes as f64);
    }

    pub fn artifact_failed(artifact: &str) {
        ::metrics::counter!("addon_catalogue_publish_errors_total", "artifact" => artifact.to_string())
            .increment(1);
    }
}

pub mod pipeline {
    pub fn run_finished(duration_secs: f64, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        ::metrics::counter!("addon_catalogue_runs_total", "outcome" => outcome).increment(1);
        ::metrics::histogram!("addon_catalogue_run_duration_seconds").record(duration_secs);
    }
}
