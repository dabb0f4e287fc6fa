//! Flow method identifiers
//!
//! One variant per user-facing vendor flow. The wire name is the camelCase
//! method name the host application calls.

use serde::{Deserialize, Serialize};

/// A user-facing vendor SDK flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowMethod {
    /// Link a customer for data permissions
    Link,
    /// Connect a customer for combined data and payment journeys
    Connect,
    /// Reconnect an existing entity
    Reconnect,
    /// Create a payment source for a customer
    CreatePaymentSource,
    /// Update the destination of an existing payment source
    UpdatePaymentSource,
    /// Complete a payment intent
    Pay,
    /// Verify a customer address
    VerifyAddress,
    /// Authorize a previously created consent
    AuthorizeConsent,
    /// Hosted checkout for a payment intent
    Checkout,
    /// Open the consent management view
    ManageConsents,
    /// Hand a redirect return back to the vendor flow
    CaptureRedirect,
}

impl FlowMethod {
    /// All flow methods, in contract order.
    pub const ALL: [FlowMethod; 11] = [
        Self::Link,
        Self::Connect,
        Self::Reconnect,
        Self::CreatePaymentSource,
        Self::UpdatePaymentSource,
        Self::Pay,
        Self::VerifyAddress,
        Self::AuthorizeConsent,
        Self::Checkout,
        Self::ManageConsents,
        Self::CaptureRedirect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Connect => "connect",
            Self::Reconnect => "reconnect",
            Self::CreatePaymentSource => "createPaymentSource",
            Self::UpdatePaymentSource => "updatePaymentSource",
            Self::Pay => "pay",
            Self::VerifyAddress => "verifyAddress",
            Self::AuthorizeConsent => "authorizeConsent",
            Self::Checkout => "checkout",
            Self::ManageConsents => "manageConsents",
            Self::CaptureRedirect => "captureRedirect",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == s)
    }

    /// Methods that substitute the default scope bundle when the mapped
    /// permission set comes out empty.
    pub fn defaults_to_baseline_scopes(&self) -> bool {
        matches!(self, Self::Link | Self::Connect | Self::VerifyAddress)
    }
}

impl std::fmt::Display for FlowMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
