//! Request metrics for the `metrics` feature.
//!
//! Counters and latency histograms are labelled by route pattern, so
//! `/user/{userId}` is one series regardless of the identifier. Probe traffic
//! is excluded to keep scrape noise out of the user series.

use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;

const NAMESPACE: &str = "user_directory";
const ENDPOINT: &str = "/metrics";
const UNSCRAPED: [&str; 2] = ["/health/ready", "/health/live"];

/// Register the request collectors served on `/metrics`.
///
/// # Errors
/// Returns [`std::io::Error`] when the collectors cannot be registered.
pub(crate) fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    UNSCRAPED
        .into_iter()
        .fold(
            PrometheusMetricsBuilder::new(NAMESPACE).endpoint(ENDPOINT),
            PrometheusMetricsBuilder::exclude,
        )
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}

/// Middleware that records metrics when a registry is present and otherwise
/// only erases the body type, so the app type is the same either way.
#[derive(Clone)]
pub(crate) struct MetricsLayer {
    metrics: Option<Arc<PrometheusMetrics>>,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        Self {
            metrics: metrics.map(Arc::new),
        }
    }
}

type BoxedService = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedService;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let Some(metrics) = self.metrics.clone() else {
            return Box::pin(async move {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Ok(boxed::service(svc))
            });
        };
        let pending = Compat::new((*metrics).clone()).new_transform(service);
        Box::pin(async move { Ok(boxed::service(pending.await?)) })
    }
}
