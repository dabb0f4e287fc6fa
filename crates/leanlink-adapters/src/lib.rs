//! LeanLink Adapters - Platform adapters for the LeanLink bridge
//!
//! One adapter per runtime target, all implementing the same
//! [`FlowAdapter`] contract:
//!
//! - **Web**: builds a snake_case payload for the vendor's injected global
//!   and converts its callback completion into a future.
//! - **Android**: locates the vendor SDK class at runtime from an ordered
//!   candidate list, caches a configured client keyed by (app token,
//!   sandbox, country), and drives the flow through a single-shot listener.
//! - **iOS**: same machine, plus a settle delay after reconfiguration and
//!   an implicit-success policy for completions without a status object.
//!
//! The vendor SDK is reachable only through the seam traits in [`traits`];
//! the [`mock`] module provides scripted implementations for tests.

pub mod android;
pub mod completion;
pub mod ios;
pub mod mock;
pub mod native;
pub mod normalize;
pub mod payload;
pub mod registry;
pub mod traits;
pub mod web;

pub use android::AndroidAdapter;
pub use ios::IosAdapter;
pub use registry::AdapterRegistry;
pub use traits::{
    Completion, ContextHandle, FlowAdapter, NativeRuntime, Platform, Probe, VendorCall,
    VendorClass, VendorClient, VendorClientBuilder, WebSdkHandle, WebSdkLocator,
};
pub use web::WebAdapter;
