//! Web payload construction
//!
//! The vendor web SDK takes snake_case keys, so every camelCase option is
//! renamed on the way out. The sandbox flag is stringified because the web
//! SDK expects a string-typed flag, and absent optional fields are omitted
//! entirely rather than serialized as null.

use serde_json::{json, Map, Value};

use leanlink_core::{FlowMethod, FlowRequest};

/// Build the vendor web SDK payload for a validated request.
pub fn web_payload(request: &FlowRequest) -> Value {
    let o = &request.options;
    let mut payload = Map::new();

    // Base fields shared by every flow. The web SDK wants "true"/"false",
    // not a boolean.
    payload.insert("sandbox".to_string(), json!(o.sandbox().to_string()));
    put(&mut payload, "app_token", &o.app_token);
    put(&mut payload, "access_token", &o.access_token);
    put(&mut payload, "success_redirect_url", &o.success_redirect_url);
    put(&mut payload, "fail_redirect_url", &o.fail_redirect_url);
    put(&mut payload, "destination_alias", &o.destination_alias);
    put(&mut payload, "destination_avatar", &o.destination_avatar);

    match request.method {
        FlowMethod::Link => {
            put(&mut payload, "customer_id", &o.customer_id);
            put_scopes(&mut payload, request);
            put(&mut payload, "bank_identifier", &o.bank_identifier);
        }
        FlowMethod::Connect => {
            put(&mut payload, "customer_id", &o.customer_id);
            put_scopes(&mut payload, request);
            put(&mut payload, "bank_identifier", &o.bank_identifier);
            put(&mut payload, "payment_destination_id", &o.payment_destination_id);
            put(&mut payload, "account_type", &o.account_type);
            put(&mut payload, "end_user_id", &o.end_user_id);
            put(&mut payload, "access_to", &o.access_to);
            put(&mut payload, "access_from", &o.access_from);
            put_bool(&mut payload, "show_consent_explanation", o.show_consent_explanation);
            put(&mut payload, "customer_metadata", &o.customer_metadata);
        }
        FlowMethod::Reconnect => {
            put(&mut payload, "reconnect_id", &o.reconnect_id);
        }
        FlowMethod::CreatePaymentSource => {
            put(&mut payload, "customer_id", &o.customer_id);
            put(&mut payload, "bank_identifier", &o.bank_identifier);
            put(&mut payload, "payment_destination_id", &o.payment_destination_id);
        }
        FlowMethod::UpdatePaymentSource => {
            put(&mut payload, "customer_id", &o.customer_id);
            put(&mut payload, "payment_source_id", &o.payment_source_id);
            put(&mut payload, "payment_destination_id", &o.payment_destination_id);
            put(&mut payload, "end_user_id", &o.end_user_id);
            put(&mut payload, "entity_id", &o.entity_id);
        }
        FlowMethod::Pay => {
            put(&mut payload, "payment_intent_id", &o.payment_intent_id);
            put(&mut payload, "bulk_payment_intent_id", &o.bulk_payment_intent_id);
            put(&mut payload, "account_id", &o.account_id);
            put(&mut payload, "bank_identifier", &o.bank_identifier);
            put(&mut payload, "end_user_id", &o.end_user_id);
            put_value(&mut payload, "risk_details", &o.risk_details);
        }
        FlowMethod::VerifyAddress => {
            put(&mut payload, "customer_id", &o.customer_id);
            put(&mut payload, "customer_name", &o.customer_name);
            put_scopes(&mut payload, request);
        }
        FlowMethod::AuthorizeConsent => {
            put(&mut payload, "customer_id", &o.customer_id);
            put(&mut payload, "consent_id", &o.consent_id);
            put_value(&mut payload, "risk_details", &o.risk_details);
        }
        FlowMethod::Checkout => {
            put(&mut payload, "payment_intent_id", &o.payment_intent_id);
            put(&mut payload, "customer_name", &o.customer_name);
            put(&mut payload, "bank_identifier", &o.bank_identifier);
            put_value(&mut payload, "risk_details", &o.risk_details);
        }
        FlowMethod::ManageConsents => {
            put(&mut payload, "customer_id", &o.customer_id);
        }
        FlowMethod::CaptureRedirect => {
            put(&mut payload, "customer_id", &o.customer_id);
            put(&mut payload, "consent_attempt_id", &o.consent_attempt_id);
            put(&mut payload, "granular_status_code", &o.granular_status_code);
            put(&mut payload, "status_additional_info", &o.status_additional_info);
        }
    }

    Value::Object(payload)
}

fn put(payload: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        payload.insert(key.to_string(), json!(v));
    }
}

fn put_bool(payload: &mut Map<String, Value>, key: &str, value: Option<bool>) {
    if let Some(v) = value {
        payload.insert(key.to_string(), json!(v));
    }
}

fn put_value(payload: &mut Map<String, Value>, key: &str, value: &Option<Value>) {
    if let Some(v) = value {
        payload.insert(key.to_string(), v.clone());
    }
}

// The web SDK takes the scope strings verbatim; only the native adapters map
// them onto vendor enum values.
fn put_scopes(payload: &mut Map<String, Value>, request: &FlowRequest) {
    payload.insert("permissions".to_string(), json!(request.options.scopes()));
}
