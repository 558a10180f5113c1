//! Custom Test Assertions
//!
//! Assertion helpers for JSON response bodies that give more meaningful
//! failure messages than indexing into a `Value` by hand.

use serde_json::Value;

use core_kernel::ClaimId;
use domain_claims::ClaimStatus;

/// Asserts that a body carries a well-formed claim id and returns it
///
/// # Panics
///
/// Panics if `claim_id` is missing or not a `CLM-` identifier
pub fn assert_claim_id(body: &Value) -> ClaimId {
    let raw = body["claim_id"]
        .as_str()
        .unwrap_or_else(|| panic!("Expected a claim_id string in {}", body));
    assert!(raw.starts_with("CLM-"), "Claim id {} lacks the CLM- prefix", raw);
    raw.parse()
        .unwrap_or_else(|e| panic!("Claim id {} does not parse: {}", raw, e))
}

/// Asserts the status label of a claim body
pub fn assert_claim_status(body: &Value, expected: ClaimStatus) {
    assert_eq!(
        body["status"].as_str(),
        Some(expected.as_str()),
        "Unexpected claim status in {}",
        body
    );
}

/// Asserts the status and reason of a claim body
///
/// `None` means the body must not carry a reason.
pub fn assert_claim_outcome(body: &Value, expected: ClaimStatus, reason: Option<&str>) {
    assert_claim_status(body, expected);
    assert_eq!(
        body.get("reason").and_then(Value::as_str),
        reason,
        "Unexpected claim reason in {}",
        body
    );
}

/// Asserts the error code of an error body
pub fn assert_error_kind(body: &Value, expected: &str) {
    assert_eq!(
        body["error"].as_str(),
        Some(expected),
        "Unexpected error kind in {}",
        body
    );
    assert!(
        body["message"].is_string(),
        "Error body {} has no message",
        body
    );
}

/// Asserts that some validation detail mentions the given field
pub fn assert_detail_mentions(body: &Value, field: &str) {
    let details = body["details"]
        .as_array()
        .unwrap_or_else(|| panic!("Expected details in {}", body));
    assert!(
        details
            .iter()
            .filter_map(Value::as_str)
            .any(|d| d.contains(field)),
        "No validation detail mentions {} in {}",
        field,
        body
    );
}
