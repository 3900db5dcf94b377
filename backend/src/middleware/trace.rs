//! Request correlation.
//!
//! [`Trace`] runs every request inside a [`TraceId`] scope and a `request`
//! span, echoes the id in the `trace-id` response header, and records one
//! completion event with the status and latency. Callers may supply their own
//! UUID in `trace-id`; anything that is not a UUID is replaced.
//!
//! The id lives in tokio task-local storage and does not follow spawned tasks;
//! wrap such work in [`TraceId::scope`].

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, info, info_span, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory; wrap it outermost so error responses carry the id too.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { inner: service }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceMiddleware<S> {
    inner: S,
}

/// Reuse the caller's id when it is a UUID, otherwise mint one.
fn request_trace_id(req: &ServiceRequest) -> TraceId {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(TraceId::from_header_value)
        .unwrap_or_else(TraceId::generate)
}

fn echo_trace_id<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            res.headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => warn!(%error, "trace id is not a valid header value"),
    }
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = request_trace_id(&req);
        let span = info_span!(
            "request",
            %trace_id,
            method = %req.method(),
            path = req.path().to_owned(),
        );
        let started = Instant::now();
        let pending = self.inner.call(req);
        let handled = async move {
            let mut res = pending.await?;
            echo_trace_id(&mut res, trace_id);
            info!(
                status = res.status().as_u16(),
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                "request completed"
            );
            Ok(res)
        };
        Box::pin(TraceId::scope(trace_id, handled.instrument(span)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as DomainError;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    const CALLER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    fn echoed(res: &ServiceResponse) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .expect("trace-id echoed")
            .to_owned()
    }

    async fn feed_handler() -> HttpResponse {
        match TraceId::current() {
            Some(id) => HttpResponse::Ok().json(serde_json::json!({ "traceId": id.to_string() })),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    async fn missing_recipe() -> Result<HttpResponse, DomainError> {
        Err(DomainError::not_found("recipe 42 not found"))
    }

    macro_rules! traced_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(Trace)
                    .route("/api/get-recipes", web::get().to(feed_handler))
                    .route("/api/get-single-recipe", web::get().to(missing_recipe)),
            )
            .await
        };
    }

    #[rstest]
    #[case::caller_uuid(Some(CALLER_ID), true)]
    #[case::garbage(Some("recipe-42"), false)]
    #[case::absent(None, false)]
    #[actix_web::test]
    async fn handler_sees_the_id_that_is_echoed(
        #[case] incoming: Option<&'static str>,
        #[case] reused: bool,
    ) {
        let app = traced_app!();
        let mut req = test::TestRequest::get().uri("/api/get-recipes");
        if let Some(value) = incoming {
            req = req.insert_header((TRACE_ID_HEADER, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        let header = echoed(&res);
        assert!(TraceId::from_header_value(&header).is_some());
        assert_eq!(header == CALLER_ID, reused);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["traceId"], header.as_str());
    }

    #[actix_web::test]
    async fn error_bodies_carry_the_request_id() {
        let app = traced_app!();
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/get-single-recipe")
                .insert_header((TRACE_ID_HEADER, CALLER_ID))
                .to_request(),
        )
        .await;
        assert_eq!(echoed(&res), CALLER_ID);
        let body: DomainError = test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(CALLER_ID));
    }
}
