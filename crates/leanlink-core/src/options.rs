//! Flow request options and per-method validation
//!
//! One option bag covers every flow method; each method reads its own subset.
//! Validation enforces the required-field contract before any vendor surface
//! is touched: required strings must be present and non-blank after trimming.

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};
use crate::method::FlowMethod;

/// Options for a flow call, in the host application's camelCase wire form.
///
/// Every field is optional at the type level; [`FlowRequest::validate`]
/// enforces the per-method required subset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowOptions {
    // Common
    pub sandbox: Option<bool>,
    pub country: Option<String>,
    pub app_token: Option<String>,
    pub access_token: Option<String>,
    pub success_redirect_url: Option<String>,
    pub fail_redirect_url: Option<String>,
    pub destination_alias: Option<String>,
    pub destination_avatar: Option<String>,

    // Data flows
    pub customer_id: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub bank_identifier: Option<String>,
    pub payment_destination_id: Option<String>,
    pub account_type: Option<String>,
    pub end_user_id: Option<String>,
    pub access_from: Option<String>,
    pub access_to: Option<String>,
    pub show_consent_explanation: Option<bool>,
    pub customer_metadata: Option<String>,

    // Reconnect
    pub reconnect_id: Option<String>,

    // Payments
    pub payment_intent_id: Option<String>,
    pub bulk_payment_intent_id: Option<String>,
    pub account_id: Option<String>,
    pub payment_source_id: Option<String>,
    pub entity_id: Option<String>,
    pub risk_details: Option<serde_json::Value>,

    // Address verification
    pub customer_name: Option<String>,

    // Consents
    pub consent_id: Option<String>,
    pub consent_attempt_id: Option<String>,
    pub granular_status_code: Option<String>,
    pub status_additional_info: Option<String>,
}

impl FlowOptions {
    /// Effective sandbox flag; the vendor defaults to sandbox on.
    pub fn sandbox(&self) -> bool {
        self.sandbox.unwrap_or(true)
    }

    /// Requested scope strings, empty when the field was omitted.
    pub fn scopes(&self) -> &[String] {
        self.permissions.as_deref().unwrap_or(&[])
    }
}

/// Trim an optional string down to a usable value.
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// A flow call: the method tag plus its option bag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowRequest {
    pub method: FlowMethod,
    pub options: FlowOptions,
}

impl FlowRequest {
    pub fn new(method: FlowMethod, options: FlowOptions) -> Self {
        Self { method, options }
    }

    /// Enforce the required-field contract for this method.
    ///
    /// Returns the first missing field as a [`BridgeError::MissingField`]
    /// naming that field; callers must not touch the vendor SDK when this
    /// fails.
    pub fn validate(&self) -> Result<()> {
        let o = &self.options;
        match self.method {
            FlowMethod::Link | FlowMethod::Connect => {
                self.require("customerId", &o.customer_id)?;
                self.require_permissions()?;
            }
            FlowMethod::Reconnect => {
                self.require("reconnectId", &o.reconnect_id)?;
            }
            FlowMethod::CreatePaymentSource | FlowMethod::ManageConsents | FlowMethod::CaptureRedirect => {
                self.require("customerId", &o.customer_id)?;
            }
            FlowMethod::UpdatePaymentSource => {
                self.require("customerId", &o.customer_id)?;
                self.require("paymentSourceId", &o.payment_source_id)?;
                self.require("paymentDestinationId", &o.payment_destination_id)?;
            }
            FlowMethod::Pay => {
                if present(&o.payment_intent_id).is_none()
                    && present(&o.bulk_payment_intent_id).is_none()
                {
                    return Err(BridgeError::missing_field(
                        "paymentIntentId or bulkPaymentIntentId",
                        self.method,
                    ));
                }
            }
            FlowMethod::VerifyAddress => {
                self.require("customerId", &o.customer_id)?;
                self.require("customerName", &o.customer_name)?;
                self.require_permissions()?;
            }
            FlowMethod::AuthorizeConsent => {
                self.require("customerId", &o.customer_id)?;
                self.require("consentId", &o.consent_id)?;
                self.require("failRedirectUrl", &o.fail_redirect_url)?;
                self.require("successRedirectUrl", &o.success_redirect_url)?;
            }
            FlowMethod::Checkout => {
                self.require("paymentIntentId", &o.payment_intent_id)?;
            }
        }
        Ok(())
    }

    fn require(&self, field: &'static str, value: &Option<String>) -> Result<()> {
        if present(value).is_none() {
            return Err(BridgeError::missing_field(field, self.method));
        }
        Ok(())
    }

    /// The permissions list must be supplied where required; it may still
    /// map entirely to unknown scopes (the default bundle covers that).
    fn require_permissions(&self) -> Result<()> {
        if self.options.permissions.is_none() {
            return Err(BridgeError::missing_field("permissions", self.method));
        }
        Ok(())
    }
}
