//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::invalid_token("bad"), ErrorCode::InvalidToken)]
#[case(Error::infeasible("bad"), ErrorCode::Infeasible)]
#[case(Error::internal("bad"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn new_substitutes_a_generic_message_for_blank_input() {
    let error = Error::new(ErrorCode::InvalidToken, "");
    assert_eq!(error.message(), "Invalid token");
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::internal("boom").try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn with_trace_id_clears_on_blank() {
    let error = Error::internal("boom")
        .with_trace_id(TRACE_ID)
        .with_trace_id("");
    assert!(error.trace_id().is_none());
}

#[rstest]
fn no_trace_id_outside_a_request_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn captures_the_ambient_trace_id(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::infeasible("no draw") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_with_camel_case_and_snake_case_code(expected_trace_id: String) {
    let error = Error::infeasible("No valid draw found")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "attempts": 1000 }));

    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({
            "code": "infeasible",
            "message": "No valid draw found",
            "traceId": expected_trace_id,
            "details": { "attempts": 1000 },
        })
    );
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::invalid_token("Invalid or corrupted link."))
        .expect("serialise error");
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_the_ambient_trace_id() {
    let ambient: TraceId = "11111111-1111-1111-1111-111111111111"
        .parse()
        .expect("valid UUID");
    let payload = json!({ "code": "invalid_token", "message": "bad link" });

    let decoded = TraceId::scope(ambient, async move {
        serde_json::from_value::<Error>(payload).expect("decode error")
    })
    .await;

    assert!(decoded.trace_id().is_none());
}

#[rstest]
#[case(json!({ "code": "invalid_request", "message": "  " }))]
#[case(json!({ "code": "invalid_request", "message": "bad", "traceId": "" }))]
#[case(json!({ "code": "invalid_request", "message": "bad", "extra": 1 }))]
#[case(json!({ "code": "teapot", "message": "bad" }))]
fn rejects_invalid_payloads(#[case] payload: serde_json::Value) {
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
