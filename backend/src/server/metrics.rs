//! Prometheus request metrics, applied only when configured.
//!
//! The layer always wraps the app so the app type stays the same whether or
//! not metrics are enabled; the disabled layer only boxes the body.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;

const NAMESPACE: &str = "recipes";
const ENDPOINT: &str = "/metrics";

/// Build the Prometheus middleware serving `/metrics`.
///
/// # Errors
/// Returns an error when the default collectors cannot be registered.
pub fn build_prometheus() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint(ENDPOINT)
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics setup failed: {err}")))
}

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

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.metrics.clone() {
            Some(metrics) => {
                let pending = Compat::new((*metrics).clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(pending.await?)) })
            }
            None => Box::pin(async move {
                let boxed_body = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Ok(boxed::service(boxed_body))
            }),
        }
    }
}
