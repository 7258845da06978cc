//! Service facade: the public operation surface.
//!
//! Every mutating call runs the same pipeline:
//!
//! ```text
//! caller principal
//!   ↓
//! 1. take the write gate (one mutation at a time, process-wide)
//!   ↓
//! 2. resolve the principal against the user directory
//!   ↓
//! 3. authorize the role for the action
//!   ↓
//! 4. hand off to the catalog manager or ledger engine
//! ```
//!
//! Reads skip the gate and go straight to the stores.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use liquorledger_auth::{authorize, Action, Role, User, UserPayload, UserRegistry, UserUpdate};
use liquorledger_core::{
    AdjustmentId, Clock, Confirmation, InMemoryStore, LedgerConfig, LedgerResult, PageRequest,
    PrincipalId, ProductId, SaleId, SharedStore, SupplyChainEventId, SystemClock, UserId,
};
use liquorledger_ledger::{
    AdjustInventory, HistoryStores, InventoryAdjustment, LedgerEngine, LogSupplyChainEvent,
    SaleRecord, SellProduct, SupplyChainEvent,
};
use liquorledger_products::{CatalogManager, LiquorProduct, LiquorType, ProductPayload, ProductUpdate};

use crate::query::LedgerQueries;

/// Every store the service reads or writes, one namespace per record type.
#[derive(Clone)]
pub struct Stores {
    pub users: SharedStore<User>,
    pub products: SharedStore<LiquorProduct>,
    pub history: HistoryStores,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            users: InMemoryStore::shared(),
            products: InMemoryStore::shared(),
            history: HistoryStores {
                sales: InMemoryStore::shared(),
                adjustments: InMemoryStore::shared(),
                events: InMemoryStore::shared(),
            },
        }
    }
}

pub struct LiquorLedgerService {
    users: UserRegistry,
    catalog: Arc<CatalogManager>,
    engine: LedgerEngine,
    queries: LedgerQueries,
    write_gate: Mutex<()>,
}

impl LiquorLedgerService {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>, config: LedgerConfig) -> Self {
        let catalog = Arc::new(CatalogManager::new(stores.products, clock.clone()));
        let engine = LedgerEngine::new(catalog.clone(), stores.history.clone(), clock.clone(), config);

        tracing::info!(
            legal_age = engine.config().legal_age,
            pricing_policy = ?engine.config().pricing_policy,
            event_product_policy = ?engine.config().event_product_policy,
            "ledger service started"
        );

        Self {
            users: UserRegistry::new(stores.users, clock),
            catalog,
            engine,
            queries: LedgerQueries::new(stores.history),
            write_gate: Mutex::new(()),
        }
    }

    /// In-memory stores and the system clock.
    pub fn in_memory(config: LedgerConfig) -> Self {
        Self::new(Stores::in_memory(), Arc::new(SystemClock), config)
    }

    pub fn config(&self) -> &LedgerConfig {
        self.engine.config()
    }

    // Users

    pub fn register_user(
        &self,
        caller: PrincipalId,
        owner: PrincipalId,
        payload: UserPayload,
    ) -> LedgerResult<User> {
        let _gate = self.gate();
        self.users.register(caller, owner, payload)
    }

    pub fn get_user(&self, id: UserId) -> LedgerResult<User> {
        self.users.get(id)
    }

    pub fn list_users(&self, request: PageRequest) -> LedgerResult<Vec<User>> {
        self.users.list_page(request)
    }

    pub fn update_user(&self, caller: PrincipalId, id: UserId, update: UserUpdate) -> LedgerResult<User> {
        let _gate = self.gate();
        self.users.update(caller, id, update)
    }

    pub fn delete_user(&self, caller: PrincipalId, id: UserId) -> LedgerResult<Confirmation> {
        let _gate = self.gate();
        self.users.delete(caller, id)
    }

    // Catalog

    pub fn add_product(&self, caller: PrincipalId, payload: ProductPayload) -> LedgerResult<LiquorProduct> {
        let _gate = self.gate();
        self.authorize(caller, Action::AddProduct)?;
        self.catalog.add_product(caller, payload)
    }

    pub fn get_product(&self, id: ProductId) -> LedgerResult<LiquorProduct> {
        self.catalog.get_product(id)
    }

    pub fn list_products(&self, request: PageRequest) -> LedgerResult<Vec<LiquorProduct>> {
        self.catalog.list_products_page(request)
    }

    pub fn list_all_products(&self) -> LedgerResult<Vec<LiquorProduct>> {
        self.catalog.list_products()
    }

    pub fn list_products_by_type(&self, liquor_type: LiquorType) -> LedgerResult<Vec<LiquorProduct>> {
        self.catalog.list_by_type(liquor_type)
    }

    pub fn update_product(
        &self,
        caller: PrincipalId,
        id: ProductId,
        update: ProductUpdate,
    ) -> LedgerResult<LiquorProduct> {
        let _gate = self.gate();
        self.authorize(caller, Action::UpdateProduct)?;
        self.catalog.update_product(id, update)
    }

    pub fn delete_product(&self, caller: PrincipalId, id: ProductId) -> LedgerResult<Confirmation> {
        let _gate = self.gate();
        self.authorize(caller, Action::DeleteProduct)?;
        self.catalog.delete_product(id)
    }

    // Ledger

    pub fn sell_product(&self, caller: PrincipalId, cmd: SellProduct) -> LedgerResult<SaleRecord> {
        let _gate = self.gate();
        self.authorize(caller, Action::SellProduct)?;
        self.engine.sell(caller, cmd)
    }

    pub fn list_sales(&self) -> LedgerResult<Vec<SaleRecord>> {
        self.queries.list_sales()
    }

    pub fn list_sales_page(&self, request: PageRequest) -> LedgerResult<Vec<SaleRecord>> {
        self.queries.list_sales_page(request)
    }

    pub fn get_sale(&self, id: SaleId) -> LedgerResult<SaleRecord> {
        self.queries.get_sale(id)
    }

    pub fn sales_for_product(&self, product_id: ProductId) -> LedgerResult<Vec<SaleRecord>> {
        self.queries.sales_for_product(product_id)
    }

    pub fn adjust_inventory(
        &self,
        caller: PrincipalId,
        cmd: AdjustInventory,
    ) -> LedgerResult<InventoryAdjustment> {
        let _gate = self.gate();
        self.authorize(caller, Action::AdjustInventory)?;
        self.engine.adjust(caller, cmd)
    }

    pub fn list_adjustments(&self) -> LedgerResult<Vec<InventoryAdjustment>> {
        self.queries.list_adjustments()
    }

    pub fn list_adjustments_page(&self, request: PageRequest) -> LedgerResult<Vec<InventoryAdjustment>> {
        self.queries.list_adjustments_page(request)
    }

    pub fn get_adjustment(&self, id: AdjustmentId) -> LedgerResult<InventoryAdjustment> {
        self.queries.get_adjustment(id)
    }

    pub fn adjustments_for_product(&self, product_id: ProductId) -> LedgerResult<Vec<InventoryAdjustment>> {
        self.queries.adjustments_for_product(product_id)
    }

    pub fn log_supply_chain_event(
        &self,
        caller: PrincipalId,
        cmd: LogSupplyChainEvent,
    ) -> LedgerResult<SupplyChainEvent> {
        let _gate = self.gate();
        self.authorize(caller, Action::LogSupplyChainEvent)?;
        self.engine.log_event(caller, cmd)
    }

    pub fn list_supply_chain_events(&self) -> LedgerResult<Vec<SupplyChainEvent>> {
        self.queries.list_supply_chain_events()
    }

    pub fn list_supply_chain_events_page(
        &self,
        request: PageRequest,
    ) -> LedgerResult<Vec<SupplyChainEvent>> {
        self.queries.list_supply_chain_events_page(request)
    }

    pub fn get_supply_chain_event(&self, id: SupplyChainEventId) -> LedgerResult<SupplyChainEvent> {
        self.queries.get_supply_chain_event(id)
    }

    pub fn supply_chain_events_for_product(
        &self,
        product_id: ProductId,
    ) -> LedgerResult<Vec<SupplyChainEvent>> {
        self.queries.supply_chain_events_for_product(product_id)
    }

    /// Poisoning is ignored; the gate guards no data.
    fn gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn authorize(&self, caller: PrincipalId, action: Action) -> LedgerResult<Role> {
        let principal = self.users.resolve(caller)?;
        authorize(&principal, action).inspect_err(|e| {
            tracing::debug!(principal = %caller, action = %action, reason = %e, "request rejected");
        })
    }
}
