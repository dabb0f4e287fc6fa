//! Result normalization
//!
//! Flattens whatever the vendor SDK handed back into a [`FlowResult`].
//! Normalization never fails: unreadable structure degrades to an ERROR
//! result with a fixed message, and absent fields stay absent.

use serde_json::Value;

use leanlink_core::{BankDetails, FlowResult, FlowStatus};

/// Message used when the vendor response cannot be read at all.
pub const SERIALIZE_FAILURE_MESSAGE: &str = "Failed to serialize response";

/// Message for completions that carry no status object.
pub const IMPLICIT_SUCCESS_MESSAGE: &str = "Operation completed";

/// The ERROR fallback for unreadable vendor responses.
pub fn serialize_failure() -> FlowResult {
    FlowResult::error(SERIALIZE_FAILURE_MESSAGE)
}

/// The implicit SUCCESS used where a platform's SDK completes without a
/// status object.
pub fn implicit_success() -> FlowResult {
    FlowResult::success(IMPLICIT_SUCCESS_MESSAGE)
}

/// Flatten a vendor response object into the unified result shape.
///
/// Fields are read defensively: a wrong-typed or missing field becomes
/// absent, an unknown or missing status becomes ERROR, and a response that
/// is not an object at all becomes the serialize-failure fallback.
pub fn normalize(response: &Value) -> FlowResult {
    let Some(object) = response.as_object() else {
        return serialize_failure();
    };

    let status = object
        .get("status")
        .and_then(Value::as_str)
        .and_then(FlowStatus::parse)
        .unwrap_or(FlowStatus::Error);

    let mut result = FlowResult::with_status(status);
    result.message = string_field(object.get("message"));
    result.method = string_field(object.get("method"));
    result.last_api_response = string_field(object.get("last_api_response"));
    result.exit_point = string_field(object.get("exit_point"));
    result.secondary_status = string_field(object.get("secondary_status"));
    result.bank = object.get("bank").and_then(bank_field);
    result
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn bank_field(value: &Value) -> Option<BankDetails> {
    let object = value.as_object()?;
    Some(BankDetails {
        bank_identifier: string_field(object.get("bank_identifier")),
        // Vendors that omit the flag are taken to support the bank.
        is_supported: object
            .get("is_supported")
            .and_then(Value::as_bool)
            .unwrap_or(true),
    })
}
