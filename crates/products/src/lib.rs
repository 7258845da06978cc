//! Product catalog.
//!
//! [`LiquorProduct`] is the current-state record for one product; the
//! [`CatalogManager`] is the only component that writes it, including the
//! stock level the ledger computes.

pub mod catalog;
pub mod product;

pub use catalog::CatalogManager;
pub use product::{
    LiquorBrand, LiquorProduct, LiquorType, ProductDetails, ProductPayload, ProductUpdate,
};
