//! Ledger engine.
//!
//! Each stock-changing operation is one read-modify-append sequence against a
//! single product:
//!
//! 1. validate the command (no store access)
//! 2. load the product and apply business rules
//! 3. write the product at its new stock level
//! 4. append the history record
//!
//! The product store and the history stores are separate, so steps 3 and 4
//! are not one transaction. If step 4 fails the product snapshot from step 2
//! is written back and the caller gets `SystemError`. Callers must serialize
//! operations on the same product; the engine holds no lock of its own.

use std::sync::Arc;

use liquorledger_core::{
    validation, AdjustmentId, Clock, EntityStore, EventProductPolicy, LedgerConfig, LedgerError,
    LedgerResult, PrincipalId, SaleId, SharedStore, StoreError, SupplyChainEventId,
};
use liquorledger_products::{CatalogManager, LiquorProduct};

use crate::adjustment::{AdjustInventory, InventoryAdjustment};
use crate::sale::{SaleRecord, SellProduct};
use crate::supply_chain::{LogSupplyChainEvent, SupplyChainEvent};

/// Append-only stores the engine writes history into.
#[derive(Clone)]
pub struct HistoryStores {
    pub sales: SharedStore<SaleRecord>,
    pub adjustments: SharedStore<InventoryAdjustment>,
    pub events: SharedStore<SupplyChainEvent>,
}

pub struct LedgerEngine {
    catalog: Arc<CatalogManager>,
    history: HistoryStores,
    clock: Arc<dyn Clock>,
    config: LedgerConfig,
}

impl LedgerEngine {
    pub fn new(
        catalog: Arc<CatalogManager>,
        history: HistoryStores,
        clock: Arc<dyn Clock>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            catalog,
            history,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Sell units of a product.
    ///
    /// Rule order: product exists, enough stock, buyer old enough.
    pub fn sell(&self, staff_id: PrincipalId, cmd: SellProduct) -> LedgerResult<SaleRecord> {
        let quantity = validation::positive("quantity", cmd.quantity)?;
        let buyer_id = validation::required_text("buyer_id", &cmd.buyer_id)?;

        let product = self.catalog.get_product(cmd.product_id)?;

        if quantity > product.current_stock {
            tracing::debug!(
                product_id = %product.id,
                requested = quantity,
                available = product.current_stock,
                "sale rejected: insufficient stock"
            );
            return Err(LedgerError::insufficient_stock(format!(
                "insufficient stock to sell {quantity} units of {} (available {})",
                product.name, product.current_stock
            )));
        }

        if let Err(e) = validation::legal_age(cmd.customer_age, self.config.legal_age) {
            tracing::debug!(
                product_id = %product.id,
                customer_age = cmd.customer_age,
                legal_age = self.config.legal_age,
                "sale rejected: age restriction"
            );
            return Err(e);
        }

        let unit_price = self
            .config
            .pricing_policy
            .unit_price(product.cost_price, product.retail_price);
        let total_price = validation::checked_total(quantity, unit_price)?;
        let new_stock = product.current_stock - quantity;

        let sale = SaleRecord {
            id: SaleId::new(),
            product_id: product.id,
            staff_id,
            buyer_id,
            quantity,
            cost_price_at_sale: product.cost_price,
            unit_price,
            total_price,
            customer_age: cmd.customer_age,
            sale_date: self.clock.now(),
        };

        self.commit(&product, new_stock, "sale", || {
            self.history.sales.put(sale.clone())
        })?;

        tracing::info!(
            sale_id = %sale.id,
            product_id = %product.id,
            quantity,
            total_price,
            current_stock = new_stock,
            "product sold"
        );
        Ok(sale)
    }

    /// Shift a product's stock by a signed, non-zero amount.
    pub fn adjust(
        &self,
        adjusted_by: PrincipalId,
        cmd: AdjustInventory,
    ) -> LedgerResult<InventoryAdjustment> {
        if cmd.quantity_changed == 0 {
            return Err(LedgerError::invalid("quantity_changed must not be zero"));
        }
        let reason = validation::required_text("reason", &cmd.reason)?;

        let product = self.catalog.get_product(cmd.product_id)?;
        let new_stock = validation::apply_delta(product.current_stock, cmd.quantity_changed)
            .inspect_err(|_| {
                tracing::debug!(
                    product_id = %product.id,
                    current_stock = product.current_stock,
                    quantity_changed = cmd.quantity_changed,
                    "adjustment rejected: negative stock"
                );
            })?;

        let adjustment = InventoryAdjustment {
            id: AdjustmentId::new(),
            product_id: product.id,
            quantity_changed: cmd.quantity_changed,
            reason,
            adjusted_by,
            adjustment_date: self.clock.now(),
        };

        self.commit(&product, new_stock, "adjustment", || {
            self.history.adjustments.put(adjustment.clone())
        })?;

        tracing::info!(
            adjustment_id = %adjustment.id,
            product_id = %product.id,
            quantity_changed = adjustment.quantity_changed,
            current_stock = new_stock,
            "inventory adjusted"
        );
        Ok(adjustment)
    }

    /// Append a supply-chain event. Stock is never touched.
    pub fn log_event(
        &self,
        logged_by: PrincipalId,
        cmd: LogSupplyChainEvent,
    ) -> LedgerResult<SupplyChainEvent> {
        let location = validation::required_text("location", &cmd.location)?;
        let participant_id = validation::required_text("participant_id", &cmd.participant_id)?;
        let quantity = validation::non_negative("quantity", cmd.quantity)?;

        match self.config.event_product_policy {
            EventProductPolicy::RequireKnownProduct => {
                self.catalog.get_product(cmd.product_id)?;
            }
            EventProductPolicy::AllowUnknownProduct => {
                if self.catalog.find_product(cmd.product_id)?.is_none() {
                    tracing::debug!(
                        product_id = %cmd.product_id,
                        "supply chain event references a product not in the catalog"
                    );
                }
            }
        }

        let event = SupplyChainEvent {
            id: SupplyChainEventId::new(),
            product_id: cmd.product_id,
            event_type: cmd.event_type,
            location,
            quantity,
            participant_id,
            logged_by,
            date: self.clock.now(),
        };
        self.history.events.put(event.clone())?;

        tracing::info!(
            event_id = %event.id,
            product_id = %event.product_id,
            event_type = %event.event_type,
            quantity,
            "supply chain event logged"
        );
        Ok(event)
    }

    /// Write the product at `new_stock`, then run `append`. On append
    /// failure the product is written back as it was loaded.
    fn commit(
        &self,
        product: &LiquorProduct,
        new_stock: u64,
        record: &'static str,
        append: impl FnOnce() -> Result<(), StoreError>,
    ) -> LedgerResult<()> {
        if let Err(e) = self.catalog.commit_stock(product, new_stock) {
            tracing::error!(product_id = %product.id, record, error = %e, "failed to write product stock");
            return Err(e);
        }

        let Err(append_err) = append() else {
            return Ok(());
        };

        tracing::error!(
            product_id = %product.id,
            record,
            error = %append_err,
            "history append failed after stock write; restoring product"
        );
        match self.catalog.restore(product) {
            Ok(()) => tracing::warn!(
                product_id = %product.id,
                current_stock = product.current_stock,
                "product stock restored after failed {record}"
            ),
            Err(restore_err) => tracing::error!(
                product_id = %product.id,
                record,
                stock_before = product.current_stock,
                stock_written = new_stock,
                error = %restore_err,
                "ledger inconsistent: stock written without a history record"
            ),
        }

        Err(LedgerError::system(format!(
            "failed to record {record} for product {}: {append_err}",
            product.id
        )))
    }
}
