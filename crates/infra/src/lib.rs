//! Infrastructure layer: service facade, query surface and store wiring.

pub mod query;
pub mod service;


pub use query::LedgerQueries;
pub use service::{LiquorLedgerService, Stores};
