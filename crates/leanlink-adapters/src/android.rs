//! Android adapter
//!
//! The vendor SDK is located at runtime by fully-qualified class name, with
//! legacy namespaces as fallbacks. The host application owns the build-time
//! contract (dependency, repository, keep rules); this adapter only detects
//! absence and explains the remediation.

use std::sync::Arc;

use async_trait::async_trait;

use leanlink_core::{FlowRequest, FlowResult, Result};

use crate::native::{NativeFlow, ResponsePolicy};
use crate::traits::{FlowAdapter, NativeRuntime, Platform, Probe};

/// Current vendor namespace first, legacy namespaces kept for older SDK
/// builds.
pub const ANDROID_CLASS_CANDIDATES: &[&str] = &[
    "me.leantech.link.android.Lean",
    "me.leantech.lean.Lean",
    "me.leantech.Lean",
];

/// Remediation shown when no candidate class resolves.
pub const ANDROID_SDK_GUIDANCE: &str = "In your app's Android project: \
(1) Add maven { url 'https://jitpack.io' } to repositories (settings.gradle or root build.gradle). \
(2) In app/build.gradle dependencies add: implementation \"me.leantech:link-sdk-android:3.0.8\". \
(3) In app/proguard-rules.pro add keep rules for me.leantech.link.android.** \
(and optionally legacy me.leantech.lean.**). Then sync and do a clean rebuild.";

/// Android adapter over the runtime-located vendor SDK
pub struct AndroidAdapter {
    flow: NativeFlow,
}

impl AndroidAdapter {
    pub fn new(runtime: Arc<dyn NativeRuntime>) -> Self {
        Self {
            flow: NativeFlow::new(
                runtime,
                Platform::Android,
                ANDROID_CLASS_CANDIDATES,
                ANDROID_SDK_GUIDANCE,
                ResponsePolicy::RequireObject,
                None,
            ),
        }
    }
}

#[async_trait]
impl FlowAdapter for AndroidAdapter {
    fn id(&self) -> &'static str {
        "android"
    }

    fn name(&self) -> &'static str {
        "Lean Link Android"
    }

    fn platform(&self) -> Platform {
        Platform::Android
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

    use leanlink_core::{BridgeError, FlowMethod, FlowOptions, FlowStatus, Permission};

    use crate::mock::{MockRuntime, MockVendorClass};

    fn link_options() -> FlowOptions {
        FlowOptions {
            customer_id: Some("cust_1".to_string()),
            permissions: Some(vec!["identity".to_string(), "accounts".to_string()]),
            app_token: Some("token_1".to_string()),
            ..FlowOptions::default()
        }
    }

    fn adapter_with(class: Arc<MockVendorClass>) -> AndroidAdapter {
        let runtime = MockRuntime::new().with_class("me.leantech.link.android.Lean", class);
        AndroidAdapter::new(Arc::new(runtime))
    }

    #[tokio::test]
    async fn test_missing_class_rejects_with_install_guidance() {
        let adapter = AndroidAdapter::new(Arc::new(MockRuntime::new()));
        for method in FlowMethod::ALL {
            let err = adapter
                .invoke(&FlowRequest::new(method, link_options()))
                .await
                .unwrap_err();
            match err {
                BridgeError::SdkUnavailable { platform, guidance } => {
                    assert_eq!(platform, "android");
                    assert!(guidance.contains("me.leantech:link-sdk-android:3.0.8"));
                    assert!(guidance.contains("jitpack.io"));
                }
                other => panic!("{method}: expected SdkUnavailable, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_legacy_namespace_fallback() {
        let class = MockVendorClass::completing_with(Some(json!({ "status": "SUCCESS" })));
        let runtime = MockRuntime::new().with_class("me.leantech.Lean", Arc::new(class));
        let adapter = AndroidAdapter::new(Arc::new(runtime));

        let result = adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, link_options()))
            .await
            .unwrap();
        assert_eq!(result.status, FlowStatus::Success);
    }

    #[tokio::test]
    async fn test_client_cache_reuse_and_invalidation() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!({ "status": "SUCCESS" }))));
        let adapter = adapter_with(Arc::clone(&class));

        let request = FlowRequest::new(FlowMethod::Link, link_options());
        adapter.invoke(&request).await.unwrap();
        adapter.invoke(&request).await.unwrap();
        assert_eq!(class.built_configs().len(), 1);

        // Changing any component of the key forces reconstruction.
        let mut options = link_options();
        options.country = Some("ae".to_string());
        adapter.invoke(&FlowRequest::new(FlowMethod::Link, options)).await.unwrap();
        assert_eq!(class.built_configs().len(), 2);

        let mut options = link_options();
        options.sandbox = Some(false);
        adapter.invoke(&FlowRequest::new(FlowMethod::Link, options)).await.unwrap();
        assert_eq!(class.built_configs().len(), 3);

        let mut options = link_options();
        options.app_token = Some("token_2".to_string());
        adapter.invoke(&FlowRequest::new(FlowMethod::Link, options)).await.unwrap();
        assert_eq!(class.built_configs().len(), 4);
    }

    #[tokio::test]
    async fn test_cached_client_covers_tokenless_calls() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!({ "status": "SUCCESS" }))));
        let adapter = adapter_with(Arc::clone(&class));

        adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, link_options()))
            .await
            .unwrap();

        let mut options = link_options();
        options.app_token = None;
        adapter.invoke(&FlowRequest::new(FlowMethod::Link, options)).await.unwrap();
        assert_eq!(class.built_configs().len(), 1);
    }

    #[tokio::test]
    async fn test_no_token_and_no_cache_is_client_unavailable() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!({ "status": "SUCCESS" }))));
        let adapter = adapter_with(class);

        let mut options = link_options();
        options.app_token = None;
        let err = adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, options))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::ClientUnavailable { method: FlowMethod::Link }));
    }

    #[tokio::test]
    async fn test_builder_failure_collapses_to_client_unavailable() {
        let class = Arc::new(MockVendorClass::failing_build("vendor exploded"));
        let adapter = adapter_with(class);

        let err = adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, link_options()))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::ClientUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_missing_context_rejects() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!({ "status": "SUCCESS" }))));
        let runtime = MockRuntime::new()
            .with_class("me.leantech.link.android.Lean", class)
            .without_context();
        let adapter = AndroidAdapter::new(Arc::new(runtime));

        let err = adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, link_options()))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::ContextUnavailable));
    }

    #[tokio::test]
    async fn test_permissions_mapped_and_unknowns_dropped() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!({ "status": "SUCCESS" }))));
        let adapter = adapter_with(Arc::clone(&class));

        let mut options = link_options();
        options.permissions = Some(vec![
            "identity".to_string(),
            "accounts".to_string(),
            "bogus".to_string(),
        ]);
        adapter.invoke(&FlowRequest::new(FlowMethod::Link, options)).await.unwrap();

        let calls = class.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].permissions, vec![Permission::Identity, Permission::Accounts]);
    }

    #[tokio::test]
    async fn test_empty_mapped_set_substitutes_default_bundle() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!({ "status": "SUCCESS" }))));
        let adapter = adapter_with(Arc::clone(&class));

        let mut options = link_options();
        options.permissions = Some(vec!["bogus".to_string()]);
        adapter.invoke(&FlowRequest::new(FlowMethod::Link, options)).await.unwrap();

        assert_eq!(
            class.calls()[0].permissions,
            vec![
                Permission::Identity,
                Permission::Accounts,
                Permission::Transactions,
                Permission::Balance
            ]
        );
    }

    #[tokio::test]
    async fn test_non_object_completion_is_response_mismatch() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!("junk"))));
        let adapter = adapter_with(class);

        let err = adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, link_options()))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::ResponseMismatch { .. }));
    }

    #[tokio::test]
    async fn test_dispatch_failure_rejects_with_cause() {
        let class = Arc::new(MockVendorClass::failing_invoke("reflection blew up"));
        let adapter = adapter_with(class);

        let err = adapter
            .invoke(&FlowRequest::new(FlowMethod::Pay, FlowOptions {
                payment_intent_id: Some("pi_1".to_string()),
                app_token: Some("token_1".to_string()),
                ..FlowOptions::default()
            }))
            .await
            .unwrap_err();
        match err {
            BridgeError::InvocationFailed { method, reason } => {
                assert_eq!(method, FlowMethod::Pay);
                assert!(reason.contains("reflection blew up"));
            }
            other => panic!("expected InvocationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_business_error_resolves_not_rejects() {
        let class = Arc::new(MockVendorClass::completing_with(Some(json!({
            "status": "ERROR",
            "message": "bank unsupported",
            "bank": { "bank_identifier": "X", "is_supported": false }
        }))));
        let adapter = adapter_with(class);

        let result = adapter
            .invoke(&FlowRequest::new(FlowMethod::Link, link_options()))
            .await
            .unwrap();
        assert_eq!(result.status, FlowStatus::Error);
        assert!(!result.bank.unwrap().is_supported);
    }
}
