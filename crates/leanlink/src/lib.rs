//! LeanLink - one contract, three runtimes
//!
//! Bridge surface for the Lean Link financial-connectivity SDK. Host
//! applications construct a [`LeanLink`] for their runtime target, register
//! the platform adapter wired to their embedding, and call one async method
//! per flow. Every flow resolves with the unified [`FlowResult`]; only
//! plumbing failures (missing fields, absent SDK, no foreground context,
//! failed dispatch) reject.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use leanlink::{LeanLink, FlowOptions};
//! # use leanlink_adapters::{Platform, WebAdapter};
//! # use leanlink_adapters::mock::MockWebLocator;
//! # async fn demo() -> leanlink::Result<()> {
//! let bridge = LeanLink::builder()
//!     .platform(Platform::Web)
//!     .adapter(WebAdapter::new(Arc::new(MockWebLocator::absent())))
//!     .build();
//!
//! let result = bridge
//!     .link(FlowOptions {
//!         customer_id: Some("cust_1".into()),
//!         permissions: Some(vec!["accounts".into(), "transactions".into()]),
//!         app_token: Some("token_1".into()),
//!         ..FlowOptions::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod plugin;

pub use plugin::{LeanLink, LeanLinkBuilder};

pub use leanlink_adapters::{
    AdapterRegistry, AndroidAdapter, FlowAdapter, IosAdapter, Platform, Probe, WebAdapter,
};
pub use leanlink_core::{
    BankDetails, BridgeError, ClientConfig, Country, FlowMethod, FlowOptions, FlowRequest,
    FlowResult, FlowStatus, Permission, Result,
};
