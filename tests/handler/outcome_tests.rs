//! Translation of validator outcomes into responses, per operation.

use crate::common::fixtures::{FakeObject, FakeValidator};
use validating_webhook::admission::{
    AdmissionRequest, AdmissionResponse, REASON_FORBIDDEN, StatusError, ValidatingHandler,
};

const WARNING: &str = "warning message";
const ANOTHER_WARNING: &str = "another warning message";

fn handler(validator: FakeValidator) -> ValidatingHandler<FakeObject, FakeValidator> {
    ValidatingHandler::new(validator)
}

/// Create, update and delete requests with `{}` payloads.
fn all_operations() -> Vec<AdmissionRequest> {
    vec![
        AdmissionRequest::create("{}"),
        AdmissionRequest::update("{}", "{}"),
        AdmissionRequest::delete("{}"),
    ]
}

fn expected_status_error() -> StatusError {
    StatusError::invalid("some message")
}

// ============================================================================
// Successful results
// ============================================================================

#[test]
fn test_success_without_warnings() {
    let handler = handler(FakeValidator::succeeding(&[]));

    for request in all_operations() {
        let response = handler.handle(&request);
        assert!(response.allowed, "{} should be allowed", request.operation);
        assert_eq!(response.result.code, 200);
        assert!(response.warnings.is_empty());
    }
    assert_eq!(handler.validator().calls(), 3);
}

#[test]
fn test_success_with_warnings() {
    let handler = handler(FakeValidator::succeeding(&[WARNING, ANOTHER_WARNING]));

    for request in all_operations() {
        let response = handler.handle(&request);
        assert!(response.allowed, "{} should be allowed", request.operation);
        assert_eq!(response.result.code, 200);
        assert_eq!(response.warnings, vec![WARNING, ANOTHER_WARNING]);
    }
}

#[test]
fn test_warnings_keep_duplicates_and_order() {
    let handler = handler(FakeValidator::succeeding(&["b", "a", "b", "b"]));

    let response = handler.handle(&AdmissionRequest::create("{}"));
    assert_eq!(response.warnings, vec!["b", "a", "b", "b"]);
}

/// Operation=Create, object `{}`, validator returns (nil, [w1, w2]).
#[test]
fn test_create_with_warnings_scenario() {
    let handler = handler(FakeValidator::succeeding(&["w1", "w2"]));

    let response = handler.handle(&AdmissionRequest::create("{}"));
    assert_eq!(response, AdmissionResponse::allowed().with_warnings(["w1", "w2"]));
}

// ============================================================================
// Structured (status) errors
// ============================================================================

#[test]
fn test_structured_error_drops_warnings() {
    let handler = handler(FakeValidator::with_status_error(
        expected_status_error(),
        &[WARNING, ANOTHER_WARNING],
    ));

    for request in all_operations() {
        let response = handler.handle(&request);
        assert!(!response.allowed, "{} should be denied", request.operation);
        assert_eq!(response.result.code, 422);
        assert_eq!(response.result, expected_status_error().status);
        assert!(response.warnings.is_empty());
    }
}

#[test]
fn test_structured_error_without_warnings() {
    let handler = handler(FakeValidator::with_status_error(expected_status_error(), &[]));

    for request in all_operations() {
        let response = handler.handle(&request);
        assert!(!response.allowed);
        assert_eq!(response.result, expected_status_error().status);
    }
}

/// Operation=Update, validator returns {422, "some message"} plus [w1].
#[test]
fn test_update_structured_error_scenario() {
    let handler = handler(FakeValidator::with_status_error(expected_status_error(), &["w1"]));

    let response = handler.handle(&AdmissionRequest::update("{}", "{}"));
    assert!(!response.allowed);
    assert_eq!(response.result.code, 422);
    assert_eq!(response.result.message, "some message");
    assert!(response.warnings.is_empty());
}

#[test]
fn test_structured_error_fields_copied_verbatim() {
    let status = StatusError::new(
        http::StatusCode::CONFLICT,
        "AlreadyExists",
        "workloads \"web\" already exists",
    );
    let handler = handler(FakeValidator::with_status_error(status.clone(), &[]));

    let response = handler.handle(&AdmissionRequest::create("{}"));
    assert_eq!(response.result.code, 409);
    assert_eq!(response.result.reason, "AlreadyExists");
    assert_eq!(response.result.message, "workloads \"web\" already exists");
}

// ============================================================================
// Plain (non-status) errors
// ============================================================================

#[test]
fn test_plain_error_without_warnings() {
    let handler = handler(FakeValidator::with_plain_error("some error", &[]));

    for request in all_operations() {
        let response = handler.handle(&request);
        assert!(!response.allowed, "{} should be denied", request.operation);
        assert_eq!(response.result.code, 403);
        assert_eq!(response.result.reason, REASON_FORBIDDEN);
        assert_eq!(response.result.message, "some error");
        assert!(response.warnings.is_empty());
    }
}

#[test]
fn test_plain_error_keeps_warnings() {
    let handler = handler(FakeValidator::with_plain_error(
        "some error",
        &[WARNING, ANOTHER_WARNING],
    ));

    for request in all_operations() {
        let response = handler.handle(&request);
        assert!(!response.allowed);
        assert_eq!(response.result.code, 403);
        assert_eq!(response.result.reason, REASON_FORBIDDEN);
        assert_eq!(response.result.message, "some error");
        assert_eq!(response.warnings, vec![WARNING, ANOTHER_WARNING]);
    }
}

/// Operation=Delete, validator returns plain error "some error".
#[test]
fn test_delete_plain_error_scenario() {
    let handler = handler(FakeValidator::with_plain_error("some error", &[]));

    let response = handler.handle(&AdmissionRequest::delete("{}"));
    assert_eq!(response, AdmissionResponse::denied("some error"));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_handling_is_idempotent() {
    let handler = handler(FakeValidator::with_plain_error("some error", &["w1"]));
    let request = AdmissionRequest::update("{}", "{}").with_uid("uid-1");

    let first = handler.handle(&request);
    let second = handler.handle(&request);
    assert_eq!(first, second);
    assert_eq!(request, AdmissionRequest::update("{}", "{}").with_uid("uid-1"));
}

#[test]
fn test_concurrent_requests_share_handler() {
    use std::sync::Arc;

    let handler = Arc::new(handler(FakeValidator::succeeding(&["w1"])));
    let threads: Vec<_> = (0..8)
        .map(|i| {
            let handler = Arc::clone(&handler);
            std::thread::spawn(move || {
                handler.handle(&AdmissionRequest::create("{}").with_uid(format!("uid-{i}")))
            })
        })
        .collect();

    for (i, thread) in threads.into_iter().enumerate() {
        let response = thread.join().unwrap();
        assert!(response.allowed);
        assert_eq!(response.uid, format!("uid-{i}"));
        assert_eq!(response.warnings, vec!["w1"]);
    }
    assert_eq!(handler.validator().calls(), 8);
}
