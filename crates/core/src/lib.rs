//! `liquorledger-core`: foundation building blocks for the inventory ledger.
//!
//! This crate contains **pure** primitives plus the keyed-store contract the
//! rest of the workspace is written against. The only store implementation
//! here is in-memory.

pub mod clock;
pub mod config;
pub mod confirmation;
pub mod entity;
pub mod error;
pub mod id;
pub mod pagination;
pub mod store;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EventProductPolicy, LedgerConfig, PricingPolicy, DEFAULT_LEGAL_AGE};
pub use confirmation::Confirmation;
pub use entity::Entity;
pub use error::{LedgerError, LedgerResult};
pub use id::{AdjustmentId, PrincipalId, ProductId, SaleId, SupplyChainEventId, UserId};
pub use pagination::{paginate, PageRequest};
pub use store::{EntityStore, InMemoryStore, KeyedStore, SharedStore, StoreError};
