//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::json;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn render(err: &Error) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = ResponseError::error_response(err);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("already liked"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id() {
    let err = Error::internal("counter diverged for post 4")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}));

    let (status, header, body) = render(&err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let err = Error::invalid_request("text must not be empty")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "text"}));

    let (status, header, body) = render(&err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body["message"], "text must not be empty");
    assert_eq!(body["details"], json!({"field": "text"}));
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header_and_field() {
    let (status, header, body) = render(&Error::conflict("post 3 is already liked")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(header.is_none());
    assert_eq!(body, json!({"code": "conflict", "message": "post 3 is already liked"}));
}

#[rstest]
fn framework_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_MESSAGE);
    assert_eq!(err.details(), None);
}
