//! Browser adapter
//!
//! Talks to the vendor's globally injected web SDK object. The global is
//! re-located before every flow call because the loader script may be
//! injected after this adapter is constructed; its absence is the single
//! biggest externally visible failure here and gets a guidance message
//! naming the missing script include.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use leanlink_core::{BridgeError, FlowRequest, FlowResult, Result};

use crate::completion::flow_completion;
use crate::normalize;
use crate::payload::web_payload;
use crate::traits::{FlowAdapter, Platform, Probe, WebSdkHandle, WebSdkLocator};

/// Remediation shown when the vendor global is missing.
pub const WEB_SDK_GUIDANCE: &str = "Add the region-specific loader script to index.html, e.g. \
<script src=\"https://cdn.leantech.me/link/loader/prod/sa/latest/lean-link-loader.min.js\"></script> (KSA) \
or .../prod/ae/latest/... (UAE).";

/// Browser adapter over the injected vendor global
pub struct WebAdapter {
    locator: Arc<dyn WebSdkLocator>,
}

impl WebAdapter {
    pub fn new(locator: Arc<dyn WebSdkLocator>) -> Self {
        Self { locator }
    }

    fn sdk(&self) -> Result<Arc<dyn WebSdkHandle>> {
        self.locator
            .locate()
            .ok_or_else(|| BridgeError::sdk_unavailable("web", WEB_SDK_GUIDANCE))
    }
}

#[async_trait]
impl FlowAdapter for WebAdapter {
    fn id(&self) -> &'static str {
        "web"
    }

    fn name(&self) -> &'static str {
        "Lean Link Web"
    }

    fn platform(&self) -> Platform {
        Platform::Web
    }

    fn probe(&self) -> Probe {
        if self.locator.locate().is_some() {
            Probe::Found
        } else {
            Probe::Missing {
                guidance: WEB_SDK_GUIDANCE.to_string(),
            }
        }
    }

    async fn invoke(&self, request: &FlowRequest) -> Result<FlowResult> {
        request.validate()?;
        let sdk = self.sdk()?;
        if !sdk.has_method(request.method) {
            return Err(BridgeError::MethodUnavailable {
                method: request.method,
                platform: "web".to_string(),
            });
        }

        let payload = web_payload(request);
        debug!(method = %request.method, "dispatching web flow");

        let (shot, completion) = flow_completion(request.method);
        sdk.invoke(request.method, payload, shot.listener());

        // Dispatched: from here on the promise only resolves. The vendor is
        // trusted to emit the result shape directly; anything unreadable
        // resolves as the ERROR fallback.
        let response = completion.wait().await?;
        let result = match response {
            Some(value) => {
                serde_json::from_value(value.clone()).unwrap_or_else(|_| normalize::normalize(&value))
            }
            None => normalize::serialize_failure(),
        };
        Ok(result)
    }
}
