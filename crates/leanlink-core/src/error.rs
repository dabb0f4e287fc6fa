//! Error types for the LeanLink bridge
//!
//! Only plumbing failures live here: missing required fields, an absent
//! vendor SDK, an unusable client, or a failed dispatch. Business outcomes
//! (user cancelled, bank unsupported, vendor-side failure) are never errors;
//! they arrive as a resolved [`FlowResult`](crate::FlowResult) with status
//! CANCELLED or ERROR.

use thiserror::Error;

use crate::method::FlowMethod;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Bridge plumbing errors
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A required option is missing or blank after trimming
    #[error("{field} is required for {method}")]
    MissingField {
        field: &'static str,
        method: FlowMethod,
    },

    /// The vendor SDK is not present on this platform
    #[error("Lean SDK not found on {platform}. {guidance}")]
    SdkUnavailable { platform: String, guidance: String },

    /// No adapter registered for the requested platform
    #[error("No adapter registered for platform '{platform}'")]
    NoAdapter { platform: String },

    /// The vendor client could not be constructed or reused
    #[error("appToken is required to initialize the Lean client. Pass appToken in {method} options.")]
    ClientUnavailable { method: FlowMethod },

    /// No foreground activity/view controller to present the flow against
    #[error("Presentation context not available")]
    ContextUnavailable,

    /// The vendor object exists but lacks the flow method
    #[error("Lean SDK method not available on {platform}: {method}")]
    MethodUnavailable {
        method: FlowMethod,
        platform: String,
    },

    /// The vendor completion delivered a payload of an unexpected type
    #[error("Lean {method} completion payload type mismatch")]
    ResponseMismatch { method: FlowMethod },

    /// The vendor dispatch or completion threw
    #[error("Lean {method} failed: {reason}")]
    InvocationFailed { method: FlowMethod, reason: String },

    /// The vendor dropped the completion callback without firing it
    #[error("Lean {method} completed without delivering a response")]
    ChannelClosed { method: FlowMethod },

    /// JSON handling error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BridgeError {
    /// Create a missing-field validation error
    pub fn missing_field(field: &'static str, method: FlowMethod) -> Self {
        Self::MissingField { field, method }
    }

    /// Create an SDK-not-found error carrying installation guidance
    pub fn sdk_unavailable(platform: impl Into<String>, guidance: impl Into<String>) -> Self {
        Self::SdkUnavailable {
            platform: platform.into(),
            guidance: guidance.into(),
        }
    }

    /// Create a post-dispatch invocation failure embedding the cause
    pub fn invocation_failed(method: FlowMethod, reason: impl Into<String>) -> Self {
        Self::InvocationFailed {
            method,
            reason: reason.into(),
        }
    }

    /// True for failures raised before the vendor flow was dispatched
    pub fn is_pre_dispatch(&self) -> bool {
        !matches!(
            self,
            Self::InvocationFailed { .. } | Self::ChannelClosed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_field_and_method() {
        let err = BridgeError::missing_field("customerId", FlowMethod::Link);
        assert_eq!(err.to_string(), "customerId is required for link");
    }

    #[test]
    fn test_sdk_unavailable_carries_guidance() {
        let err = BridgeError::sdk_unavailable("web", "Add the loader script to index.html.");
        let text = err.to_string();
        assert!(text.contains("web"));
        assert!(text.contains("loader script"));
    }

    #[test]
    fn test_pre_dispatch_classification() {
        assert!(BridgeError::ContextUnavailable.is_pre_dispatch());
        assert!(BridgeError::missing_field("consentId", FlowMethod::AuthorizeConsent).is_pre_dispatch());
        assert!(!BridgeError::invocation_failed(FlowMethod::Pay, "boom").is_pre_dispatch());
        assert!(!BridgeError::ChannelClosed { method: FlowMethod::Pay }.is_pre_dispatch());
    }
}
