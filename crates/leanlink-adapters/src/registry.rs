//! Adapter registry
//!
//! Central registry for platform adapters. The facade resolves the adapter
//! for the runtime target it is embedded in; registration order is kept so
//! diagnostics list adapters deterministically.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use leanlink_core::{BridgeError, Result};

use crate::traits::{FlowAdapter, Platform, Probe};

/// Registry of platform adapters
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn FlowAdapter>>,
    order: Vec<String>,
}

impl AdapterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register an adapter
    pub fn register<A: FlowAdapter + 'static>(&mut self, adapter: A) {
        let id = adapter.id().to_string();
        debug!(adapter_id = %id, platform = adapter.platform().as_str(), "registering adapter");
        self.order.push(id.clone());
        self.adapters.insert(id, Arc::new(adapter));
    }

    /// Get an adapter by ID
    pub fn get(&self, id: &str) -> Option<Arc<dyn FlowAdapter>> {
        self.adapters.get(id).cloned()
    }

    /// All registered adapter IDs, in registration order
    pub fn adapter_ids(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Resolve the adapter serving a platform
    pub fn resolve(&self, platform: Platform) -> Result<Arc<dyn FlowAdapter>> {
        self.order
            .iter()
            .filter_map(|id| self.adapters.get(id))
            .find(|adapter| adapter.platform() == platform)
            .cloned()
            .ok_or_else(|| BridgeError::NoAdapter {
                platform: platform.as_str().to_string(),
            })
    }

    /// Probe every registered adapter; useful for doctor-style diagnostics
    /// in host applications.
    pub fn probe_all(&self) -> Vec<(String, Probe)> {
        self.order
            .iter()
            .filter_map(|id| self.adapters.get(id))
            .map(|adapter| (adapter.id().to_string(), adapter.probe()))
            .collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
