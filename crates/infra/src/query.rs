//! Query surface over the history stores.
//!
//! Read-only. History records may reference products that have since been
//! deleted; nothing here looks the product up.

use liquorledger_core::{
    paginate, AdjustmentId, KeyedStore, LedgerError, LedgerResult, PageRequest, ProductId, SaleId,
    SharedStore, SupplyChainEventId,
};
use liquorledger_ledger::{HistoryStores, InventoryAdjustment, SaleRecord, SupplyChainEvent};

pub struct LedgerQueries {
    history: HistoryStores,
}

impl LedgerQueries {
    pub fn new(history: HistoryStores) -> Self {
        Self { history }
    }

    pub fn get_sale(&self, id: SaleId) -> LedgerResult<SaleRecord> {
        lookup(&self.history.sales, &id.to_string(), "sale")
    }

    pub fn list_sales(&self) -> LedgerResult<Vec<SaleRecord>> {
        Ok(self.history.sales.values()?)
    }

    pub fn list_sales_page(&self, request: PageRequest) -> LedgerResult<Vec<SaleRecord>> {
        paginate(self.list_sales()?, request)
    }

    pub fn sales_for_product(&self, product_id: ProductId) -> LedgerResult<Vec<SaleRecord>> {
        Ok(filter(self.list_sales()?, |s| s.product_id == product_id))
    }

    pub fn get_adjustment(&self, id: AdjustmentId) -> LedgerResult<InventoryAdjustment> {
        lookup(&self.history.adjustments, &id.to_string(), "inventory adjustment")
    }

    pub fn list_adjustments(&self) -> LedgerResult<Vec<InventoryAdjustment>> {
        Ok(self.history.adjustments.values()?)
    }

    pub fn list_adjustments_page(
        &self,
        request: PageRequest,
    ) -> LedgerResult<Vec<InventoryAdjustment>> {
        paginate(self.list_adjustments()?, request)
    }

    pub fn adjustments_for_product(
        &self,
        product_id: ProductId,
    ) -> LedgerResult<Vec<InventoryAdjustment>> {
        Ok(filter(self.list_adjustments()?, |a| a.product_id == product_id))
    }

    pub fn get_supply_chain_event(&self, id: SupplyChainEventId) -> LedgerResult<SupplyChainEvent> {
        lookup(&self.history.events, &id.to_string(), "supply chain event")
    }

    pub fn list_supply_chain_events(&self) -> LedgerResult<Vec<SupplyChainEvent>> {
        Ok(self.history.events.values()?)
    }

    pub fn list_supply_chain_events_page(
        &self,
        request: PageRequest,
    ) -> LedgerResult<Vec<SupplyChainEvent>> {
        paginate(self.list_supply_chain_events()?, request)
    }

    pub fn supply_chain_events_for_product(
        &self,
        product_id: ProductId,
    ) -> LedgerResult<Vec<SupplyChainEvent>> {
        Ok(filter(self.list_supply_chain_events()?, |e| e.product_id == product_id))
    }
}

fn lookup<V>(store: &SharedStore<V>, key: &str, what: &str) -> LedgerResult<V> {
    store
        .get(key)?
        .ok_or_else(|| LedgerError::product_missing(format!("{what} with id {key} does not exist")))
}

fn filter<V>(records: Vec<V>, keep: impl Fn(&V) -> bool) -> Vec<V> {
    records.into_iter().filter(|r| keep(r)).collect()
}
