use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use liquorledger_core::{Entity, PrincipalId, ProductId, SaleId};

/// Immutable record of one sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: SaleId,
    pub product_id: ProductId,
    /// Principal that rang up the sale.
    pub staff_id: PrincipalId,
    pub buyer_id: String,
    pub quantity: u64,
    pub cost_price_at_sale: u64,
    /// Price per unit the total was computed from.
    pub unit_price: u64,
    pub total_price: u64,
    pub customer_age: u32,
    pub sale_date: DateTime<Utc>,
}

impl Entity for SaleRecord {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: sell `quantity` units of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellProduct {
    pub product_id: ProductId,
    pub buyer_id: String,
    pub quantity: i64,
    pub customer_age: u32,
}
