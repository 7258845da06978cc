//! Ledger engine and history records.
//!
//! Every stock change goes through [`LedgerEngine`]: it reads the product,
//! computes the new stock, writes the product through the catalog and
//! appends one immutable history record. Supply-chain events are appended
//! without touching stock.

pub mod adjustment;
pub mod engine;
pub mod sale;
pub mod supply_chain;

pub use adjustment::{AdjustInventory, InventoryAdjustment};
pub use engine::{HistoryStores, LedgerEngine};
pub use sale::{SaleRecord, SellProduct};
pub use supply_chain::{LogSupplyChainEvent, SupplyChainEvent, SupplyChainEventType};
