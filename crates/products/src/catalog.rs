//! Product Catalog Manager.
//!
//! Owns every write to the product store. Name uniqueness is checked
//! case-insensitively against the trimmed name.

use std::sync::Arc;

use liquorledger_core::{
    paginate, validation, Clock, Confirmation, EntityStore, LedgerError, LedgerResult,
    PageRequest, PrincipalId, ProductId, SharedStore,
};

use crate::product::{LiquorProduct, LiquorType, ProductPayload, ProductUpdate};

pub struct CatalogManager {
    products: SharedStore<LiquorProduct>,
    clock: Arc<dyn Clock>,
}

impl CatalogManager {
    pub fn new(products: SharedStore<LiquorProduct>, clock: Arc<dyn Clock>) -> Self {
        Self { products, clock }
    }

    pub fn add_product(
        &self,
        added_by: PrincipalId,
        payload: ProductPayload,
    ) -> LedgerResult<LiquorProduct> {
        let details = payload.details.check()?;
        let current_stock = validation::non_negative("current_stock", payload.current_stock)?;

        self.ensure_name_free(&details.name, None)?;

        let now = self.clock.now();
        let product = LiquorProduct {
            id: ProductId::new(),
            name: details.name,
            liquor_type: details.liquor_type,
            brand: details.brand,
            alcohol_content: details.alcohol_content,
            batch_number: details.batch_number,
            vintage_year: details.vintage_year,
            bottle_size: details.bottle_size,
            cost_price: details.cost_price,
            retail_price: details.retail_price,
            current_stock,
            expiry_date: details.expiry_date,
            added_by,
            created_at: now,
            updated_at: now,
        };
        self.products.put(product.clone())?;

        tracing::info!(
            product_id = %product.id,
            name = %product.name,
            current_stock = product.current_stock,
            "product added"
        );
        Ok(product)
    }

    pub fn get_product(&self, id: ProductId) -> LedgerResult<LiquorProduct> {
        self.find_product(id)?
            .ok_or_else(|| LedgerError::product_missing(format!("product with id {id} does not exist")))
    }

    pub fn find_product(&self, id: ProductId) -> LedgerResult<Option<LiquorProduct>> {
        Ok(self.products.get(&id.to_string())?)
    }

    /// Replace descriptive fields. The id, creator and creation time are
    /// kept; stock changes only when the update carries a value.
    pub fn update_product(&self, id: ProductId, update: ProductUpdate) -> LedgerResult<LiquorProduct> {
        let details = update.details.check()?;
        let new_stock = update
            .current_stock
            .map(|s| validation::non_negative("current_stock", s))
            .transpose()?;

        let mut product = self.get_product(id)?;
        self.ensure_name_free(&details.name, Some(id))?;

        let previous_stock = product.current_stock;
        product.apply(details);
        if let Some(stock) = new_stock {
            product.current_stock = stock;
        }
        product.updated_at = self.clock.now();
        self.products.put(product.clone())?;

        if product.current_stock != previous_stock {
            tracing::warn!(
                product_id = %id,
                previous_stock,
                current_stock = product.current_stock,
                "stock overwritten by product update"
            );
        }
        tracing::info!(product_id = %id, name = %product.name, "product updated");
        Ok(product)
    }

    /// Remove a product. History records that reference it are left alone.
    pub fn delete_product(&self, id: ProductId) -> LedgerResult<Confirmation> {
        match self.products.remove(&id.to_string())? {
            Some(product) => {
                tracing::info!(product_id = %id, name = %product.name, "product deleted");
                Ok(Confirmation::new(
                    id.to_string(),
                    format!("product {} deleted successfully", product.name),
                ))
            }
            None => Err(LedgerError::product_missing(format!(
                "product with id {id} does not exist"
            ))),
        }
    }

    pub fn list_products(&self) -> LedgerResult<Vec<LiquorProduct>> {
        Ok(self.products.values()?)
    }

    pub fn list_products_page(&self, request: PageRequest) -> LedgerResult<Vec<LiquorProduct>> {
        paginate(self.products.values()?, request)
    }

    /// Products of one type. An empty result is `ProductDoesNotExist`.
    pub fn list_by_type(&self, liquor_type: LiquorType) -> LedgerResult<Vec<LiquorProduct>> {
        let matches: Vec<_> = self
            .products
            .values()?
            .into_iter()
            .filter(|p| p.liquor_type == liquor_type)
            .collect();

        if matches.is_empty() {
            return Err(LedgerError::product_missing(format!(
                "no products of type {liquor_type} found"
            )));
        }
        Ok(matches)
    }

    /// Persist `product` at `new_stock`. Only the ledger engine calls this.
    pub fn commit_stock(&self, product: &LiquorProduct, new_stock: u64) -> LedgerResult<LiquorProduct> {
        let updated = product.with_stock(new_stock, self.clock.now());
        self.products.put(updated.clone())?;
        Ok(updated)
    }

    /// Write back a snapshot taken before a failed ledger operation.
    pub fn restore(&self, snapshot: &LiquorProduct) -> LedgerResult<()> {
        self.products.put(snapshot.clone())?;
        Ok(())
    }

    fn ensure_name_free(&self, name: &str, except: Option<ProductId>) -> LedgerResult<()> {
        let wanted = name.to_lowercase();
        let taken = self
            .products
            .values()?
            .iter()
            .any(|p| Some(p.id) != except && p.name.to_lowercase() == wanted);

        if taken {
            return Err(LedgerError::product_exists(format!(
                "product with name {name} already exists"
            )));
        }
        Ok(())
    }
}
