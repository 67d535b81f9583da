use axum::{routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Prometheus recorder + the `/metrics` route. Install once at startup;
/// the joke facade registers its own series on first use.
pub struct Metrics {
    handle: PrometheusHandle,
}

impl Metrics {
    pub fn init() -> Self {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("prometheus: install recorder");
        Self { handle }
    }

    /// Router exposing `/metrics` in the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move { handle.render() }
            }),
        )
    }
}
