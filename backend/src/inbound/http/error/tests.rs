//! Status mapping and client-facing bodies for domain errors.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "7f1c2a4e-0b7d-4f3e-9a51-2d8c6e0b4f10";

/// Render `err` and return its status, echoed trace id, and JSON body.
async fn render(err: Error) -> (StatusCode, Option<String>, Value) {
    let res = err.error_response();
    let status = res.status();
    let trace = res
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(res.into_body()).await.expect("body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, trace, body)
}

#[rstest]
#[case::validation(Error::invalid_request("recipeName is required"), 400)]
#[case::no_session(Error::unauthorized("login required"), 401)]
#[case::not_the_author(Error::forbidden("only the author may edit"), 403)]
#[case::deleted(Error::not_found("recipe 42 not found"), 404)]
#[case::wrong_verb(Error::method_not_allowed("use POST"), 405)]
#[case::taken_username(Error::conflict("username taken"), 409)]
#[case::generator_down(Error::service_unavailable("generator unavailable"), 503)]
#[case::bug(Error::internal("index out of range"), 500)]
fn each_code_has_one_status(#[case] err: Error, #[case] status: u16) {
    assert_eq!(err.status_code().as_u16(), status);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_hide_their_cause() {
    let err = Error::internal("connection refused: postgres://admin:hunter2@db")
        .with_details(json!({ "query": "SELECT *" }))
        .with_trace_id(TRACE_ID);

    let (status, trace, body) = render(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": INTERNAL_MESSAGE,
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_are_shown_as_raised() {
    let err = Error::invalid_request("ingredients must not be empty")
        .with_details(json!({ "field": "ingredients" }))
        .with_trace_id(TRACE_ID);
    let expected = serde_json::to_value(&err).expect("serialise");

    let (status, trace, body) = render(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(trace.as_deref(), Some(TRACE_ID));
    assert_eq!(body, expected);
}

#[rstest]
#[actix_web::test]
async fn untraced_errors_send_no_header() {
    let (_, trace, body) = render(Error::not_found("recipe 7 not found")).await;
    assert!(trace.is_none());
    assert!(body.get("traceId").is_none());
}

#[rstest]
fn public_view_borrows_client_errors() {
    let err = Error::forbidden("only the author may delete");
    assert!(matches!(public_view(&err), Cow::Borrowed(shown) if *shown == err));
}

#[rstest]
fn framework_errors_become_opaque_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("payload too large").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_MESSAGE);
    assert!(err.details().is_none());
}
