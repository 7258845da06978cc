//! Ledger configuration.
//!
//! Historical versions of this system disagreed on the legal age (18 vs 21)
//! and on whether a sale is priced at cost or retail. Both are configuration
//! here, with one documented default each.

use serde::{Deserialize, Serialize};

/// Minimum customer age for a sale unless configured otherwise.
pub const DEFAULT_LEGAL_AGE: u32 = 18;

pub const ENV_LEGAL_AGE: &str = "LIQUORLEDGER_LEGAL_AGE";
pub const ENV_PRICING_POLICY: &str = "LIQUORLEDGER_PRICING_POLICY";
pub const ENV_EVENT_PRODUCT_POLICY: &str = "LIQUORLEDGER_EVENT_PRODUCT_POLICY";

/// Which product price a sale total is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingPolicy {
    /// `total = quantity * retail_price`.
    #[default]
    RetailPrice,
    /// `total = quantity * cost_price`.
    CostPrice,
}

impl PricingPolicy {
    pub fn unit_price(self, cost_price: u64, retail_price: u64) -> u64 {
        match self {
            PricingPolicy::RetailPrice => retail_price,
            PricingPolicy::CostPrice => cost_price,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retail" | "retail_price" => Some(PricingPolicy::RetailPrice),
            "cost" | "cost_price" => Some(PricingPolicy::CostPrice),
            _ => None,
        }
    }
}

/// Whether a supply-chain event may reference a product the catalog does not
/// know (events arriving before catalog registration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventProductPolicy {
    #[default]
    RequireKnownProduct,
    AllowUnknownProduct,
}

impl EventProductPolicy {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "require" | "require_known_product" => Some(EventProductPolicy::RequireKnownProduct),
            "allow" | "allow_unknown_product" => Some(EventProductPolicy::AllowUnknownProduct),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub legal_age: u32,
    pub pricing_policy: PricingPolicy,
    pub event_product_policy: EventProductPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            legal_age: DEFAULT_LEGAL_AGE,
            pricing_policy: PricingPolicy::default(),
            event_product_policy: EventProductPolicy::default(),
        }
    }
}

impl LedgerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing keys use defaults; unparsable values log a warning and use
    /// defaults too.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_LEGAL_AGE) {
            match raw.trim().parse::<u32>() {
                Ok(age) => config.legal_age = age,
                Err(e) => tracing::warn!(
                    key = ENV_LEGAL_AGE,
                    value = %raw,
                    error = %e,
                    "invalid legal age; using default {DEFAULT_LEGAL_AGE}"
                ),
            }
        }

        if let Some(raw) = lookup(ENV_PRICING_POLICY) {
            match PricingPolicy::parse(&raw) {
                Some(policy) => config.pricing_policy = policy,
                None => tracing::warn!(
                    key = ENV_PRICING_POLICY,
                    value = %raw,
                    "unknown pricing policy; using retail"
                ),
            }
        }

        if let Some(raw) = lookup(ENV_EVENT_PRODUCT_POLICY) {
            match EventProductPolicy::parse(&raw) {
                Some(policy) => config.event_product_policy = policy,
                None => tracing::warn!(
                    key = ENV_EVENT_PRODUCT_POLICY,
                    value = %raw,
                    "unknown event product policy; requiring known products"
                ),
            }
        }

        config
    }

    pub fn with_legal_age(mut self, legal_age: u32) -> Self {
        self.legal_age = legal_age;
        self
    }

    pub fn with_pricing_policy(mut self, policy: PricingPolicy) -> Self {
        self.pricing_policy = policy;
        self
    }

    pub fn with_event_product_policy(mut self, policy: EventProductPolicy) -> Self {
        self.event_product_policy = policy;
        self
    }
}
