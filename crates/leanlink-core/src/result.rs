//! Normalized flow results
//!
//! Every adapter resolves with this one shape regardless of what the vendor
//! SDK returned. `status` is always present; everything else defaults to
//! absent rather than failing when the vendor response lacks it. The wire
//! form is snake_case, matching the vendor web SDK's own result keys.

use serde::{Deserialize, Serialize};

/// Terminal status of a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowStatus {
    Success,
    Cancelled,
    Error,
}

impl FlowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Cancelled => "CANCELLED",
            Self::Error => "ERROR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUCCESS" => Some(Self::Success),
            "CANCELLED" => Some(Self::Cancelled),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Bank details flattened out of a vendor response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_identifier: Option<String>,
    /// Vendors that do not expose the flag are assumed to support the bank.
    #[serde(default = "default_supported")]
    pub is_supported: bool,
}

fn default_supported() -> bool {
    true
}

impl Default for BankDetails {
    fn default() -> Self {
        Self {
            bank_identifier: None,
            is_supported: true,
        }
    }
}

/// Normalized outcome of a flow, snake_case on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    pub status: FlowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Echo of the flow method that produced this result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_api_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<BankDetails>,
}

impl FlowResult {
    /// A result carrying only a status.
    pub fn with_status(status: FlowStatus) -> Self {
        Self {
            status,
            message: None,
            method: None,
            last_api_response: None,
            exit_point: None,
            secondary_status: None,
            bank: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        let mut result = Self::with_status(FlowStatus::Success);
        result.message = Some(message.into());
        result
    }

    pub fn error(message: impl Into<String>) -> Self {
        let mut result = Self::with_status(FlowStatus::Error);
        result.message = Some(message.into());
        result
    }
}
