use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use liquorledger_core::{AdjustmentId, Entity, PrincipalId, ProductId};

/// Immutable record of a manual stock correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryAdjustment {
    pub id: AdjustmentId,
    pub product_id: ProductId,
    /// Negative for shrinkage or damage, positive for restock corrections.
    pub quantity_changed: i64,
    pub reason: String,
    pub adjusted_by: PrincipalId,
    pub adjustment_date: DateTime<Utc>,
}

impl Entity for InventoryAdjustment {
    type Id = AdjustmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: shift a product's stock by a signed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustInventory {
    pub product_id: ProductId,
    pub quantity_changed: i64,
    pub reason: String,
}
