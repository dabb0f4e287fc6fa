//! Shared native call machinery
//!
//! Both mobile adapters run the same per-call state machine: resolve the
//! vendor class from an ordered candidate list, reuse or rebuild the cached
//! client, validate, resolve the foreground context, map permissions,
//! marshal onto the main thread, and bind a single-shot listener. The
//! platform differences (candidate names, guidance text, warmup delay,
//! missing-response policy) are data on [`NativeFlow`], not separate code
//! paths.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use leanlink_core::{
    BridgeError, ClientConfig, FlowRequest, FlowResult, Permission, Result, SDK_LANGUAGE,
    SDK_VERSION,
};

use crate::completion::flow_completion;
use crate::normalize;
use crate::traits::{NativeRuntime, Platform, Probe, VendorCall, VendorClass, VendorClient};

/// What a completion without a response object means on this platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// The listener contract guarantees a response object; anything else is
    /// a payload mismatch (Android).
    RequireObject,
    /// The SDK has completion paths that fire without a status object;
    /// treat those as success (iOS).
    ImplicitSuccess,
}

struct CachedClient {
    key: ClientConfig,
    client: Arc<dyn VendorClient>,
}

/// Shared native flow engine, parameterized per platform
pub struct NativeFlow {
    runtime: Arc<dyn NativeRuntime>,
    platform: Platform,
    class_candidates: &'static [&'static str],
    guidance: &'static str,
    response_policy: ResponsePolicy,
    /// Settle period after a reconfiguration, before the first flow call.
    warmup: Option<Duration>,
    // Read and replaced only during call setup; the lock exists because the
    // adapter is Send + Sync, not to serialize flows.
    cache: Mutex<Option<CachedClient>>,
}

impl NativeFlow {
    pub fn new(
        runtime: Arc<dyn NativeRuntime>,
        platform: Platform,
        class_candidates: &'static [&'static str],
        guidance: &'static str,
        response_policy: ResponsePolicy,
        warmup: Option<Duration>,
    ) -> Self {
        Self {
            runtime,
            platform,
            class_candidates,
            guidance,
            response_policy,
            warmup,
            cache: Mutex::new(None),
        }
    }

    /// Probe for the vendor class without touching anything else.
    pub fn probe(&self) -> Probe {
        if self.resolve_class().is_ok() {
            Probe::Found
        } else {
            Probe::Missing {
                guidance: self.guidance.to_string(),
            }
        }
    }

    fn resolve_class(&self) -> Result<Arc<dyn VendorClass>> {
        for candidate in self.class_candidates {
            if let Some(class) = self.runtime.resolve_class(candidate) {
                debug!(platform = self.platform.as_str(), class = candidate, "resolved vendor class");
                return Ok(class);
            }
        }
        Err(BridgeError::sdk_unavailable(
            self.platform.as_str(),
            self.guidance,
        ))
    }

    /// Reuse the cached client when the configuration key matches, otherwise
    /// rebuild through the vendor builder. Returns the client and whether a
    /// reconfiguration happened.
    fn client_for(
        &self,
        class: &Arc<dyn VendorClass>,
        request: &FlowRequest,
    ) -> Result<(Arc<dyn VendorClient>, bool)> {
        let mut cache = self.cache.lock().expect("client cache poisoned");

        match ClientConfig::from_options(&request.options) {
            Some(config) => {
                if let Some(cached) = cache.as_ref() {
                    if cached.key == config {
                        return Ok((Arc::clone(&cached.client), false));
                    }
                }
                let client = self.build_client(class, &config, request)?;
                debug!(
                    platform = self.platform.as_str(),
                    sandbox = config.sandbox,
                    country = config.country.code(),
                    "configured vendor client"
                );
                *cache = Some(CachedClient {
                    key: config,
                    client: Arc::clone(&client),
                });
                Ok((client, true))
            }
            // No usable app token on this call; a previously configured
            // client may still cover it.
            None => match cache.as_ref() {
                Some(cached) => Ok((Arc::clone(&cached.client), false)),
                None => Err(BridgeError::ClientUnavailable {
                    method: request.method,
                }),
            },
        }
    }

    fn build_client(
        &self,
        class: &Arc<dyn VendorClass>,
        config: &ClientConfig,
        request: &FlowRequest,
    ) -> Result<Arc<dyn VendorClient>> {
        // Builder, reflection, and vendor-internal failures all collapse to
        // one client-unavailable condition.
        let unavailable = || BridgeError::ClientUnavailable {
            method: request.method,
        };

        let mut builder = class.builder().ok_or_else(unavailable)?;
        builder.app_token(&config.app_token);
        builder.version(SDK_VERSION);
        builder.country(config.country.code());
        builder.language(SDK_LANGUAGE);
        builder.sandbox_mode(config.sandbox);
        builder.build().map_err(|reason| {
            debug!(platform = self.platform.as_str(), %reason, "vendor client build failed");
            unavailable()
        })
    }

    /// Run the full per-call state machine.
    pub async fn run(&self, request: &FlowRequest) -> Result<FlowResult> {
        let class = self.resolve_class()?;
        request.validate()?;
        let (client, reconfigured) = self.client_for(&class, request)?;
        let context = self
            .runtime
            .foreground_context()
            .ok_or(BridgeError::ContextUnavailable)?;
        let permissions = Permission::effective_scopes(request.method, request.options.scopes());

        if reconfigured {
            if let Some(delay) = self.warmup {
                // The vendor client needs a brief settle period after
                // reconfiguration before it can present a flow.
                tokio::time::sleep(delay).await;
            }
        }

        let call = VendorCall {
            method: request.method,
            request: request.clone(),
            permissions,
            context,
        };

        let (shot, completion) = flow_completion(request.method);
        let listener = shot.listener();
        let method = request.method;
        let dispatch_shot = shot.clone();
        debug!(platform = self.platform.as_str(), method = %method, "dispatching native flow");
        self.runtime.dispatch_main(Box::new(move || {
            if let Err(reason) = client.invoke(call, listener) {
                dispatch_shot.reject(BridgeError::invocation_failed(method, reason));
            }
        }));

        let response = completion.wait().await?;
        self.settle(request, response)
    }

    fn settle(&self, request: &FlowRequest, response: Option<Value>) -> Result<FlowResult> {
        match (response, self.response_policy) {
            (Some(value), ResponsePolicy::RequireObject) => {
                if !value.is_object() {
                    return Err(BridgeError::ResponseMismatch {
                        method: request.method,
                    });
                }
                Ok(normalize::normalize(&value))
            }
            (Some(value), ResponsePolicy::ImplicitSuccess) => Ok(normalize::normalize(&value)),
            (None, ResponsePolicy::ImplicitSuccess) => Ok(normalize::implicit_success()),
            (None, ResponsePolicy::RequireObject) => Err(BridgeError::ResponseMismatch {
                method: request.method,
            }),
        }
    }
}
