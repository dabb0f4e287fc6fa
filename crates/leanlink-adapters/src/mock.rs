//! Scripted vendor implementations
//!
//! In-memory stand-ins for the vendor seams, used by this crate's tests and
//! available to host applications that want to exercise their flow handling
//! without a real SDK. Each mock records what reached it and completes with
//! a scripted response.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use leanlink_core::{ClientConfig, Country, FlowMethod};

use crate::traits::{
    Completion, ContextHandle, NativeRuntime, VendorCall, VendorClass, VendorClient,
    VendorClientBuilder, WebSdkHandle, WebSdkLocator,
};

// -----------------------------------------------------------------------------
// Web
// -----------------------------------------------------------------------------

/// Scripted injected global
pub struct MockWebSdk {
    response: Option<Value>,
    missing_method: Option<FlowMethod>,
    invocations: Mutex<Vec<(FlowMethod, Value)>>,
}

impl MockWebSdk {
    /// A global that completes every flow with the given payload.
    pub fn completing_with(response: Option<Value>) -> Self {
        Self {
            response,
            missing_method: None,
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// A global missing one flow method (older loader script).
    pub fn without_method(method: FlowMethod) -> Self {
        Self {
            response: None,
            missing_method: Some(method),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Everything that was dispatched to this global.
    pub fn invocations(&self) -> Vec<(FlowMethod, Value)> {
        self.invocations.lock().expect("invocations poisoned").clone()
    }
}

impl WebSdkHandle for MockWebSdk {
    fn has_method(&self, method: FlowMethod) -> bool {
        self.missing_method != Some(method)
    }

    fn invoke(&self, method: FlowMethod, payload: Value, done: Completion) {
        self.invocations
            .lock()
            .expect("invocations poisoned")
            .push((method, payload));
        done(self.response.clone());
    }
}

/// Locator whose global can appear (or vanish) between calls
pub struct MockWebLocator {
    sdk: Mutex<Option<Arc<MockWebSdk>>>,
}

impl MockWebLocator {
    /// No loader script on the page.
    pub fn absent() -> Self {
        Self {
            sdk: Mutex::new(None),
        }
    }

    pub fn with_sdk(sdk: Arc<MockWebSdk>) -> Self {
        Self {
            sdk: Mutex::new(Some(sdk)),
        }
    }

    /// Simulate the loader script arriving after adapter construction.
    pub fn inject(&self, sdk: Arc<MockWebSdk>) {
        *self.sdk.lock().expect("sdk slot poisoned") = Some(sdk);
    }
}

impl WebSdkLocator for MockWebLocator {
    fn locate(&self) -> Option<Arc<dyn WebSdkHandle>> {
        self.sdk
            .lock()
            .expect("sdk slot poisoned")
            .clone()
            .map(|sdk| sdk as Arc<dyn WebSdkHandle>)
    }
}

// -----------------------------------------------------------------------------
// Native
// -----------------------------------------------------------------------------

struct ClassState {
    response: Option<Value>,
    fail_build: Option<String>,
    fail_invoke: Option<String>,
    built: Mutex<Vec<ClientConfig>>,
    calls: Mutex<Vec<VendorCall>>,
}

/// Scripted vendor entry class shared with every client it builds
pub struct MockVendorClass {
    state: Arc<ClassState>,
}

impl MockVendorClass {
    /// A class whose clients complete every flow with the given payload.
    pub fn completing_with(response: Option<Value>) -> Self {
        Self::with_state(response, None, None)
    }

    /// A class whose builder chain fails.
    pub fn failing_build(reason: &str) -> Self {
        Self::with_state(None, Some(reason.to_string()), None)
    }

    /// A class whose clients fail at dispatch.
    pub fn failing_invoke(reason: &str) -> Self {
        Self::with_state(None, None, Some(reason.to_string()))
    }

    fn with_state(
        response: Option<Value>,
        fail_build: Option<String>,
        fail_invoke: Option<String>,
    ) -> Self {
        Self {
            state: Arc::new(ClassState {
                response,
                fail_build,
                fail_invoke,
                built: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Configurations the builder chain was run with, in order.
    pub fn built_configs(&self) -> Vec<ClientConfig> {
        self.state.built.lock().expect("built poisoned").clone()
    }

    /// Flow invocations that reached a built client, in order.
    pub fn calls(&self) -> Vec<VendorCall> {
        self.state.calls.lock().expect("calls poisoned").clone()
    }
}

impl VendorClass for MockVendorClass {
    fn builder(&self) -> Option<Box<dyn VendorClientBuilder>> {
        Some(Box::new(MockBuilder {
            state: Arc::clone(&self.state),
            app_token: String::new(),
            sandbox: false,
            country: String::new(),
        }))
    }
}

struct MockBuilder {
    state: Arc<ClassState>,
    app_token: String,
    sandbox: bool,
    country: String,
}

impl VendorClientBuilder for MockBuilder {
    fn app_token(&mut self, token: &str) {
        self.app_token = token.to_string();
    }

    fn version(&mut self, _version: &str) {}

    fn country(&mut self, code: &str) {
        self.country = code.to_string();
    }

    fn language(&mut self, _language: &str) {}

    fn sandbox_mode(&mut self, enabled: bool) {
        self.sandbox = enabled;
    }

    fn build(self: Box<Self>) -> Result<Arc<dyn VendorClient>, String> {
        if let Some(reason) = &self.state.fail_build {
            return Err(reason.clone());
        }
        let config = ClientConfig {
            app_token: self.app_token,
            sandbox: self.sandbox,
            country: Country::resolve(Some(&self.country)),
        };
        self.state
            .built
            .lock()
            .expect("built poisoned")
            .push(config.clone());
        Ok(Arc::new(MockVendorClient {
            state: Arc::clone(&self.state),
            config,
        }))
    }
}

struct MockVendorClient {
    state: Arc<ClassState>,
    config: ClientConfig,
}

impl VendorClient for MockVendorClient {
    fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn invoke(&self, call: VendorCall, listener: Completion) -> Result<(), String> {
        if let Some(reason) = &self.state.fail_invoke {
            return Err(reason.clone());
        }
        self.state.calls.lock().expect("calls poisoned").push(call);
        listener(self.state.response.clone());
        Ok(())
    }
}

/// Scripted host runtime
pub struct MockRuntime {
    classes: HashMap<String, Arc<dyn VendorClass>>,
    context: Option<ContextHandle>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
            context: Some(ContextHandle::new(1)),
        }
    }

    /// Register a resolvable vendor class under a fully-qualified name.
    pub fn with_class(mut self, name: &str, class: Arc<MockVendorClass>) -> Self {
        self.classes.insert(name.to_string(), class);
        self
    }

    /// Simulate the app being backgrounded (no presentable context).
    pub fn without_context(mut self) -> Self {
        self.context = None;
        self
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeRuntime for MockRuntime {
    fn resolve_class(&self, qualified_name: &str) -> Option<Arc<dyn VendorClass>> {
        self.classes.get(qualified_name).cloned()
    }

    fn foreground_context(&self) -> Option<ContextHandle> {
        self.context.clone()
    }

    // Tests run the dispatched task inline; the main-thread constraint is a
    // host concern, not something the mocks can reproduce.
    fn dispatch_main(&self, task: Box<dyn FnOnce() + Send>) {
        task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_web_mock_records_invocations() {
        let sdk = MockWebSdk::completing_with(Some(json!({ "status": "SUCCESS" })));
        sdk.invoke(FlowMethod::Link, json!({ "customer_id": "c" }), Box::new(|_| {}));

        let invocations = sdk.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].0, FlowMethod::Link);
    }

    #[test]
    fn test_builder_captures_config() {
        let class = MockVendorClass::completing_with(None);
        let mut builder = class.builder().unwrap();
        builder.app_token("tok");
        builder.version("latest");
        builder.country("ae");
        builder.language("en");
        builder.sandbox_mode(true);
        let client = builder.build().unwrap();

        assert_eq!(client.config().app_token, "tok");
        assert_eq!(client.config().country, Country::UnitedArabEmirates);
        assert!(client.config().sandbox);
        assert_eq!(class.built_configs().len(), 1);
    }

    #[test]
    fn test_failing_build() {
        let class = MockVendorClass::failing_build("nope");
        let builder = class.builder().unwrap();
        assert_eq!(builder.build().unwrap_err(), "nope");
        assert!(class.built_configs().is_empty());
    }
}
