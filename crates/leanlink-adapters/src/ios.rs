//! iOS adapter
//!
//! Same state machine as Android with two platform quirks: the vendor client
//! needs a short settle period after reconfiguration before it can present a
//! flow, and some SDK completion paths fire without a status object, which
//! counts as success.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use leanlink_core::{FlowRequest, FlowResult, Result};

use crate::native::{NativeFlow, ResponsePolicy};
use crate::traits::{FlowAdapter, NativeRuntime, Platform, Probe};

/// Module-qualified name first; older vendor builds exported the bare class.
pub const IOS_CLASS_CANDIDATES: &[&str] = &["LeanSDK.Lean", "Lean"];

/// Remediation shown when the vendor library is not linked.
pub const IOS_SDK_GUIDANCE: &str = "Add the LeanSDK Swift package to your app target \
(https://github.com/leantechnologies/link-sdk-ios-distribution) and rebuild. \
The bridge resolves LeanSDK.Lean at runtime and cannot link it for you.";

/// Settle period after a configuration change.
pub const SETUP_WARMUP_DELAY: Duration = Duration::from_millis(200);

/// iOS adapter over the embedded vendor SDK
pub struct IosAdapter {
    flow: NativeFlow,
}

impl IosAdapter {
    pub fn new(runtime: Arc<dyn NativeRuntime>) -> Self {
        Self {
            flow: NativeFlow::new(
                runtime,
                Platform::Ios,
                IOS_CLASS_CANDIDATES,
                IOS_SDK_GUIDANCE,
                ResponsePolicy::ImplicitSuccess,
                Some(SETUP_WARMUP_DELAY),
            ),
        }
    }
}

#[async_trait]
impl FlowAdapter for IosAdapter {
    fn id(&self) -> &'static str {
        "ios"
    }

    fn name(&self) -> &'static str {
        "Lean Link iOS"
    }

    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn probe(&self) -> Probe {
        self.flow.probe()
    }

    async fn invoke(&self, request: &FlowRequest) -> Result<FlowResult> {
        self.flow.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::time::Instant;

    use leanlink_core::{BridgeError, FlowMethod, FlowOptions, FlowStatus};

    use crate::mock::{MockRuntime, MockVendorClass};
    use crate::normalize::IMPLICIT_SUCCESS_MESSAGE;

    fn link_options() -> FlowOptions {
        FlowOptions {
            customer_id: Some("cust_1".to_string()),
            permissions: Some(vec!["accounts".to_string()]),
            app_token: Some("token_1".to_string()),
            ..FlowOptions::default()
        }
    }

    fn adapter_with(class: Arc<MockVendorClass>) -> IosAdapter {
        let runtime = MockRuntime::new().with_class("LeanSDK.Lean", class);
        IosAdapter::new(Arc::new(runtime))
    }

    #[tokio::test]
    async fn test_missing_library_rejects_with_guidance() {
        let adapter = IosAdapter::new(Arc::new(MockRuntime::new()));
        let err = adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, link_options()))
            .await
            .unwrap_err();
        match err {
            BridgeError::SdkUnavailable { platform, guidance } => {
                assert_eq!(platform, "ios");
                assert!(guidance.contains("LeanSDK"));
            }
            other => panic!("expected SdkUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bare_class_name_fallback() {
        let class = MockVendorClass::completing_with(Some(json!({ "status": "SUCCESS" })));
        let runtime = MockRuntime::new().with_class("Lean", Arc::new(class));
        let adapter = IosAdapter::new(Arc::new(runtime));

        let result = adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, link_options()))
            .await
            .unwrap();
        assert_eq!(result.status, FlowStatus::Success);
    }

    #[tokio::test]
    async fn test_completion_without_response_is_implicit_success() {
        let class = Arc::new(MockVendorClass::completing_with(None));
        let adapter = adapter_with(class);

        let result = adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, link_options()))
            .await
            .unwrap();
        assert_eq!(result.status, FlowStatus::Success);
        assert_eq!(result.message.as_deref(), Some(IMPLICIT_SUCCESS_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_warmup_applies_once_per_configuration() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!({ "status": "SUCCESS" }))));
        let adapter = adapter_with(Arc::clone(&class));
        let request = FlowRequest::new(FlowMethod::Link, link_options());

        // First call reconfigures and waits out the settle period.
        let start = Instant::now();
        adapter.invoke(&request).await.unwrap();
        assert!(start.elapsed() >= SETUP_WARMUP_DELAY);

        // Same key: no delay.
        let start = Instant::now();
        adapter.invoke(&request).await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);

        // Key change: delay again.
        let mut options = link_options();
        options.country = Some("ae".to_string());
        let start = Instant::now();
        adapter.invoke(&FlowRequest::new(FlowMethod::Link, options)).await.unwrap();
        assert!(start.elapsed() >= SETUP_WARMUP_DELAY);

        assert_eq!(class.built_configs().len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_resolves_with_diagnostics() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!({
            "status": "CANCELLED",
            "message": "user dismissed",
            "exit_point": "bank_list",
            "secondary_status": "USER_ABORT"
        }))));
        let adapter = adapter_with(class);

        let result = adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, link_options()))
            .await
            .unwrap();
        assert_eq!(result.status, FlowStatus::Cancelled);
        assert_eq!(result.exit_point.as_deref(), Some("bank_list"));
        assert_eq!(result.secondary_status.as_deref(), Some("USER_ABORT"));
    }

    #[tokio::test]
    async fn test_junk_response_normalizes_instead_of_rejecting() {
        // Unlike Android, iOS never rejects on payload shape.
        let class = Arc::new(MockVendorClass::completing_with(Some(json!("junk"))));
        let adapter = adapter_with(class);

        let result = adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, link_options()))
            .await
            .unwrap();
        assert_eq!(result.status, FlowStatus::Error);
    }

    #[tokio::test]
    async fn test_validation_precedes_client_setup() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!({ "status": "SUCCESS" }))));
        let adapter = adapter_with(Arc::clone(&class));

        let err = adapter
            .invoke(&FlowRequest::new(FlowMethod::VerifyAddress, link_options()))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::MissingField { field: "customerName", .. }));
        assert!(class.built_configs().is_empty());
        assert!(class.calls().is_empty());
    }
}
