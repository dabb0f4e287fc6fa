//! Client configuration key
//!
//! The native adapters cache one constructed vendor client per adapter
//! instance. [`ClientConfig`] is the invalidation key: any change to the app
//! token, sandbox flag, or country forces reconstruction through the vendor
//! builder.

use serde::{Deserialize, Serialize};

use crate::options::FlowOptions;

/// Vendor SDK version requested when building a client.
pub const SDK_VERSION: &str = "latest";

/// Language passed to the vendor builder.
pub const SDK_LANGUAGE: &str = "en";

/// Vendor deployment region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    SaudiArabia,
    UnitedArabEmirates,
}

impl Country {
    /// ISO-style code the vendor builder expects.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SaudiArabia => "sa",
            Self::UnitedArabEmirates => "ae",
        }
    }

    /// Resolve a country option. Unknown or absent values fall back to
    /// Saudi Arabia, the vendor's default region.
    pub fn resolve(country: Option<&str>) -> Self {
        match country.map(|c| c.trim().to_lowercase()).as_deref() {
            Some("ae") | Some("uae") => Self::UnitedArabEmirates,
            Some("sa") | Some("ksa") => Self::SaudiArabia,
            _ => Self::SaudiArabia,
        }
    }
}

impl Default for Country {
    fn default() -> Self {
        Self::SaudiArabia
    }
}

/// Effective configuration of a constructed vendor client
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientConfig {
    pub app_token: String,
    pub sandbox: bool,
    pub country: Country,
}

impl ClientConfig {
    /// Extract the configuration key from call options. Returns `None` when
    /// no usable app token is present; the caller decides whether a cached
    /// client can cover for that.
    pub fn from_options(options: &FlowOptions) -> Option<Self> {
        let app_token = options.app_token.as_deref()?.trim();
        if app_token.is_empty() {
            return None;
        }
        Some(Self {
            app_token: app_token.to_string(),
            sandbox: options.sandbox(),
            country: Country::resolve(options.country.as_deref()),
        })
    }
}
