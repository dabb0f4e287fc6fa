//! LeanLink Core - Unified flow contract for the LeanLink bridge
//!
//! This crate defines the single request/response schema shared by every
//! platform adapter: flow methods, option fields, permission scopes, the
//! client configuration key, the normalized result shape, and the error
//! types that separate plumbing failures from business outcomes.
//!
//! The contract is deliberately platform-neutral. Adapters translate it into
//! whatever the vendor SDK expects on their target (snake_case web payloads,
//! native builder chains); nothing in this crate touches a vendor surface.

pub mod config;
pub mod error;
pub mod method;
pub mod options;
pub mod permissions;
pub mod result;

pub use config::{ClientConfig, Country, SDK_LANGUAGE, SDK_VERSION};
pub use error::{BridgeError, Result};
pub use method::FlowMethod;
pub use options::{FlowOptions, FlowRequest};
pub use permissions::Permission;
pub use result::{BankDetails, FlowResult, FlowStatus};
