//! Core traits for platform adapters and the vendor SDK seams
//!
//! Every adapter implements [`FlowAdapter`] so the facade can dispatch a flow
//! without caring which runtime target it lands on. The vendor SDK itself is
//! reachable only through the seam traits below: the browser adapter talks to
//! an injected global through [`WebSdkLocator`]/[`WebSdkHandle`], and the
//! native adapters locate and drive the embedded library through
//! [`NativeRuntime`], [`VendorClass`], and [`VendorClient`]. Host embeddings
//! provide the real implementations; tests use the scripted ones in
//! [`crate::mock`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use leanlink_core::{ClientConfig, FlowMethod, FlowRequest, FlowResult, Permission, Result};

/// Runtime targets the bridge can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Browser, vendor SDK injected as a global script object
    Web,
    /// Android, vendor SDK located at runtime
    Android,
    /// iOS, vendor SDK with a managed singleton client
    Ios,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "web" => Some(Self::Web),
            "android" => Some(Self::Android),
            "ios" => Some(Self::Ios),
            _ => None,
        }
    }
}

/// Outcome of probing for the vendor SDK on a platform
#[derive(Debug, Clone)]
pub enum Probe {
    /// The vendor SDK is reachable
    Found,
    /// The vendor SDK is absent; guidance names the remediation
    Missing { guidance: String },
}

impl Probe {
    pub fn found(&self) -> bool {
        matches!(self, Self::Found)
    }
}

/// Platform adapter - translates the unified contract into one vendor
/// invocation style
#[async_trait]
pub trait FlowAdapter: Send + Sync {
    /// Unique identifier for this adapter (e.g., "web", "android")
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Runtime target this adapter serves
    fn platform(&self) -> Platform;

    /// Check whether the vendor SDK is currently reachable
    fn probe(&self) -> Probe;

    /// Run a flow to completion.
    ///
    /// `Err` is reserved for plumbing failures; business outcomes, including
    /// cancellation, resolve as `Ok` with the status carried in the result.
    async fn invoke(&self, request: &FlowRequest) -> Result<FlowResult>;
}

impl std::fmt::Debug for dyn FlowAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowAdapter").field("id", &self.id()).finish()
    }
}

/// Single-shot completion callback handed to the vendor SDK.
///
/// The vendor fires it once when the user-facing flow finishes; `None` means
/// the flow completed without a status object.
pub type Completion = Box<dyn FnOnce(Option<Value>) + Send>;

// -----------------------------------------------------------------------------
// Web seam
// -----------------------------------------------------------------------------

/// Handle to the vendor's injected global script object
pub trait WebSdkHandle: Send + Sync {
    /// Whether the global exposes the given flow method.
    fn has_method(&self, method: FlowMethod) -> bool;

    /// Fire-and-forget invocation; the vendor calls `done` when the flow
    /// completes. Must not block.
    fn invoke(&self, method: FlowMethod, payload: Value, done: Completion);
}

/// Locates the injected vendor global.
///
/// Looked up before every flow call, never cached: the loader script can be
/// injected after the adapter loads.
pub trait WebSdkLocator: Send + Sync {
    fn locate(&self) -> Option<Arc<dyn WebSdkHandle>>;
}

// -----------------------------------------------------------------------------
// Native seam
// -----------------------------------------------------------------------------

/// Opaque handle to the foreground presentation context (activity / view
/// controller) a flow is presented against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextHandle {
    id: u64,
}

impl ContextHandle {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Host runtime services the native adapters depend on
pub trait NativeRuntime: Send + Sync {
    /// Resolve a vendor class by fully-qualified name. Adapters try an
    /// ordered candidate list; first match wins.
    fn resolve_class(&self, qualified_name: &str) -> Option<Arc<dyn VendorClass>>;

    /// The active foreground context, if any.
    fn foreground_context(&self) -> Option<ContextHandle>;

    /// Run a task on the platform's main/UI thread. Vendor flow invocations
    /// must go through here; presenting from any other thread is a platform
    /// violation, not a policy choice.
    fn dispatch_main(&self, task: Box<dyn FnOnce() + Send>);
}

/// A resolved vendor SDK entry class
pub trait VendorClass: Send + Sync {
    /// Start the vendor's client builder chain. `None` when the class is
    /// present but its builder machinery is not (stripped or incompatible
    /// vendor build).
    fn builder(&self) -> Option<Box<dyn VendorClientBuilder>>;
}

/// The vendor's client builder. Setter order mirrors the vendor API; errors
/// flatten to strings at this seam.
pub trait VendorClientBuilder: Send {
    fn app_token(&mut self, token: &str);
    fn version(&mut self, version: &str);
    fn country(&mut self, code: &str);
    fn language(&mut self, language: &str);
    fn sandbox_mode(&mut self, enabled: bool);
    fn build(self: Box<Self>) -> std::result::Result<Arc<dyn VendorClient>, String>;
}

/// One vendor flow invocation, fully resolved
#[derive(Debug, Clone)]
pub struct VendorCall {
    pub method: FlowMethod,
    pub request: FlowRequest,
    pub permissions: Vec<Permission>,
    pub context: ContextHandle,
}

/// A constructed, configured vendor client
pub trait VendorClient: Send + Sync {
    /// Effective configuration this client was built with.
    fn config(&self) -> &ClientConfig;

    /// Invoke a flow, registering the single-shot listener. An `Err` means
    /// the dispatch itself failed and the listener will never fire.
    fn invoke(&self, call: VendorCall, listener: Completion) -> std::result::Result<(), String>;
}

impl std::fmt::Debug for dyn VendorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorClient").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_roundtrip() {
        for platform in [Platform::Web, Platform::Android, Platform::Ios] {
            assert_eq!(Platform::parse(platform.as_str()), Some(platform));
        }
        assert_eq!(Platform::parse("iOS"), Some(Platform::Ios));
        assert_eq!(Platform::parse("desktop"), None);
    }

    #[test]
    fn test_probe_found() {
        assert!(Probe::Found.found());
        assert!(!Probe::Missing { guidance: "install it".to_string() }.found());
    }
}
