//! The unified plugin surface
//!
//! One async entry point per flow method. Each call tags the method, hands
//! the option bag to the adapter registered for the active platform, and
//! returns the normalized result. Business outcomes (cancelled, vendor-side
//! error) resolve; only plumbing failures reject.

use tracing::debug;

use leanlink_adapters::{AdapterRegistry, FlowAdapter, Platform};
use leanlink_core::{FlowMethod, FlowOptions, FlowRequest, FlowResult, Result};

/// The LeanLink bridge
pub struct LeanLink {
    registry: AdapterRegistry,
    platform: Platform,
}

impl LeanLink {
    pub fn builder() -> LeanLinkBuilder {
        LeanLinkBuilder::new()
    }

    /// The runtime target this bridge dispatches to.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Registered adapters and their SDK probes, for doctor-style host
    /// diagnostics.
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    async fn dispatch(&self, method: FlowMethod, options: FlowOptions) -> Result<FlowResult> {
        let adapter = self.registry.resolve(self.platform)?;
        debug!(method = %method, adapter = adapter.id(), "dispatching flow");
        adapter.invoke(&FlowRequest::new(method, options)).await
    }

    /// Link a customer for data permissions.
    pub async fn link(&self, options: FlowOptions) -> Result<FlowResult> {
        self.dispatch(FlowMethod::Link, options).await
    }

    /// Connect a customer for combined data and payment journeys.
    pub async fn connect(&self, options: FlowOptions) -> Result<FlowResult> {
        self.dispatch(FlowMethod::Connect, options).await
    }

    /// Reconnect an existing entity.
    pub async fn reconnect(&self, options: FlowOptions) -> Result<FlowResult> {
        self.dispatch(FlowMethod::Reconnect, options).await
    }

    /// Create a payment source for a customer.
    pub async fn create_payment_source(&self, options: FlowOptions) -> Result<FlowResult> {
        self.dispatch(FlowMethod::CreatePaymentSource, options).await
    }

    /// Update the destination of an existing payment source.
    pub async fn update_payment_source(&self, options: FlowOptions) -> Result<FlowResult> {
        self.dispatch(FlowMethod::UpdatePaymentSource, options).await
    }

    /// Complete a payment intent.
    pub async fn pay(&self, options: FlowOptions) -> Result<FlowResult> {
        self.dispatch(FlowMethod::Pay, options).await
    }

    /// Verify a customer address.
    pub async fn verify_address(&self, options: FlowOptions) -> Result<FlowResult> {
        self.dispatch(FlowMethod::VerifyAddress, options).await
    }

    /// Authorize a previously created consent.
    pub async fn authorize_consent(&self, options: FlowOptions) -> Result<FlowResult> {
        self.dispatch(FlowMethod::AuthorizeConsent, options).await
    }

    /// Hosted checkout for a payment intent.
    pub async fn checkout(&self, options: FlowOptions) -> Result<FlowResult> {
        self.dispatch(FlowMethod::Checkout, options).await
    }

    /// Open the consent management view.
    pub async fn manage_consents(&self, options: FlowOptions) -> Result<FlowResult> {
        self.dispatch(FlowMethod::ManageConsents, options).await
    }

    /// Hand a redirect return back to the vendor flow.
    pub async fn capture_redirect(&self, options: FlowOptions) -> Result<FlowResult> {
        self.dispatch(FlowMethod::CaptureRedirect, options).await
    }
}

/// Builder for [`LeanLink`]
pub struct LeanLinkBuilder {
    registry: AdapterRegistry,
    platform: Platform,
}

impl LeanLinkBuilder {
    pub fn new() -> Self {
        Self {
            registry: AdapterRegistry::new(),
            platform: Platform::Web,
        }
    }

    /// Set the runtime target flows are dispatched to. Defaults to web.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Register an adapter.
    pub fn adapter<A: FlowAdapter + 'static>(mut self, adapter: A) -> Self {
        self.registry.register(adapter);
        self
    }

    pub fn build(self) -> LeanLink {
        LeanLink {
            registry: self.registry,
            platform: self.platform,
        }
    }
}

impl Default for LeanLinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use leanlink_adapters::mock::{MockRuntime, MockVendorClass, MockWebLocator, MockWebSdk};
    use leanlink_adapters::{AndroidAdapter, WebAdapter};
    use leanlink_core::{BridgeError, FlowStatus};

    fn web_bridge(sdk: Arc<MockWebSdk>) -> LeanLink {
        LeanLink::builder()
            .platform(Platform::Web)
            .adapter(WebAdapter::new(Arc::new(MockWebLocator::with_sdk(sdk))))
            .build()
    }

    #[tokio::test]
    async fn test_pay_end_to_end_on_web() {
        let sdk = Arc::new(MockWebSdk::completing_with(Some(json!({ "status": "SUCCESS" }))));
        let bridge = web_bridge(Arc::clone(&sdk));

        let result = bridge
            .pay(FlowOptions {
                payment_intent_id: Some("pi_1".to_string()),
                account_id: Some("acc_1".to_string()),
                ..FlowOptions::default()
            })
            .await
            .unwrap();

        assert_eq!(result.status, FlowStatus::Success);
        let (_, payload) = &sdk.invocations()[0];
        assert_eq!(payload["payment_intent_id"], "pi_1");
        assert_eq!(payload["account_id"], "acc_1");
        assert_eq!(payload["sandbox"], "true");
    }

    #[tokio::test]
    async fn test_missing_field_rejects_before_vendor() {
        let sdk = Arc::new(MockWebSdk::completing_with(Some(json!({ "status": "SUCCESS" }))));
        let bridge = web_bridge(Arc::clone(&sdk));

        let err = bridge.checkout(FlowOptions::default()).await.unwrap_err();
        assert!(matches!(err, BridgeError::MissingField { field: "paymentIntentId", .. }));
        assert!(sdk.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_android_flow_through_facade() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!({
            "status": "CANCELLED",
            "exit_point": "bank_list"
        }))));
        let runtime = MockRuntime::new().with_class("me.leantech.link.android.Lean", class);
        let bridge = LeanLink::builder()
            .platform(Platform::Android)
            .adapter(AndroidAdapter::new(Arc::new(runtime)))
            .build();

        let result = bridge
            .connect(FlowOptions {
                customer_id: Some("cust_1".to_string()),
                permissions: Some(vec!["accounts".to_string()]),
                app_token: Some("token_1".to_string()),
                ..FlowOptions::default()
            })
            .await
            .unwrap();

        assert_eq!(result.status, FlowStatus::Cancelled);
        assert_eq!(result.exit_point.as_deref(), Some("bank_list"));
    }

    #[tokio::test]
    async fn test_unregistered_platform_rejects() {
        let bridge = LeanLink::builder().platform(Platform::Ios).build();
        let err = bridge.manage_consents(FlowOptions::default()).await.unwrap_err();
        assert!(matches!(err, BridgeError::NoAdapter { .. }));
    }
}
