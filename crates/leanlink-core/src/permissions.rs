//! Permission scope mapping
//!
//! Requested scopes arrive as free-form strings from the host application and
//! are mapped onto the vendor's fixed permission set. The lookup is
//! case-insensitive and unrecognized entries are dropped silently, never
//! rejected - a host sending a scope this SDK version does not know about
//! must not break the flow.

use serde::{Deserialize, Serialize};

use crate::method::FlowMethod;

/// A data-access scope requested from the vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Identity,
    Identities,
    Accounts,
    Transactions,
    Balance,
    Payments,
    Beneficiaries,
    DirectDebits,
    StandingOrders,
    ScheduledPayments,
}

/// Scope bundle substituted when a baseline-scope method maps to nothing.
pub const DEFAULT_SCOPES: [Permission; 4] = [
    Permission::Identity,
    Permission::Accounts,
    Permission::Transactions,
    Permission::Balance,
];

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Identities => "identities",
            Self::Accounts => "accounts",
            Self::Transactions => "transactions",
            Self::Balance => "balance",
            Self::Payments => "payments",
            Self::Beneficiaries => "beneficiaries",
            Self::DirectDebits => "direct_debits",
            Self::StandingOrders => "standing_orders",
            Self::ScheduledPayments => "scheduled_payments",
        }
    }

    /// The vendor SDK's enum constant name for this scope.
    pub fn vendor_name(&self) -> &'static str {
        match self {
            Self::Identity => "IDENTITY",
            Self::Identities => "IDENTITIES",
            Self::Accounts => "ACCOUNTS",
            Self::Transactions => "TRANSACTIONS",
            Self::Balance => "BALANCE",
            Self::Payments => "PAYMENTS",
            Self::Beneficiaries => "BENEFICIARIES",
            Self::DirectDebits => "DIRECT_DEBITS",
            Self::StandingOrders => "STANDING_ORDERS",
            Self::ScheduledPayments => "SCHEDULED_PAYMENTS",
        }
    }

    /// Parse a requested scope string, case-insensitively. Both the compact
    /// and underscored spellings of the multi-word scopes are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "identity" => Some(Self::Identity),
            "identities" => Some(Self::Identities),
            "accounts" => Some(Self::Accounts),
            "transactions" => Some(Self::Transactions),
            "balance" => Some(Self::Balance),
            "payments" => Some(Self::Payments),
            "beneficiaries" => Some(Self::Beneficiaries),
            "directdebits" | "direct_debits" => Some(Self::DirectDebits),
            "standingorders" | "standing_orders" => Some(Self::StandingOrders),
            "scheduledpayments" | "scheduled_payments" => Some(Self::ScheduledPayments),
            _ => None,
        }
    }

    /// Map requested scope strings onto recognized permissions, dropping
    /// unknown entries and duplicates while preserving request order.
    pub fn map_scopes(scopes: &[String]) -> Vec<Permission> {
        let mut mapped = Vec::new();
        for scope in scopes {
            if let Some(permission) = Permission::parse(scope) {
                if !mapped.contains(&permission) {
                    mapped.push(permission);
                }
            }
        }
        mapped
    }

    /// Map scopes for a specific method, substituting the default bundle on
    /// the methods that must never pass an empty set to the vendor.
    pub fn effective_scopes(method: FlowMethod, scopes: &[String]) -> Vec<Permission> {
        let mapped = Self::map_scopes(scopes);
        if mapped.is_empty() && method.defaults_to_baseline_scopes() {
            return DEFAULT_SCOPES.to_vec();
        }
        mapped
    }
}
