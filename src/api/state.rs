//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::service::RecordService;
use crate::storage::traits::DynStorage;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend.
    pub storage: Arc<DynStorage>,
    /// Record service for every clinic resource.
    pub records: RecordService,
    /// Prometheus render handle, `None` when metrics are disabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(storage: Arc<DynStorage>, metrics: Option<PrometheusHandle>) -> Self {
        let records = RecordService::new(Arc::clone(&storage));

        Self {
            storage,
            records,
            metrics,
        }
    }
}
