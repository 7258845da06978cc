//! Runs one sale end to end against in-memory stores and prints the result.

use anyhow::Context;
use serde_json::json;

use liquorledger_auth::{Role, UserPayload};
use liquorledger_core::{LedgerConfig, PrincipalId};
use liquorledger_infra::LiquorLedgerService;
use liquorledger_ledger::SellProduct;
use liquorledger_products::{LiquorBrand, LiquorType, ProductDetails, ProductPayload};

fn main() -> anyhow::Result<()> {
    liquorledger_observability::init();

    let config = LedgerConfig::from_env();
    let service = LiquorLedgerService::in_memory(config);

    let admin = PrincipalId::new();
    service
        .register_user(
            admin,
            admin,
            UserPayload {
                username: "admin".to_string(),
                role: Role::Admin,
                contact_info: "store office".to_string(),
            },
        )
        .context("bootstrap admin")?;

    let product = service
        .add_product(
            admin,
            ProductPayload {
                details: ProductDetails {
                    name: "Glenfiddich 12".to_string(),
                    liquor_type: LiquorType::Whiskey,
                    brand: LiquorBrand::Other,
                    alcohol_content: 40,
                    batch_number: "GF12-2024-001".to_string(),
                    vintage_year: None,
                    bottle_size: "700ml".to_string(),
                    cost_price: 30,
                    retail_price: 50,
                    expiry_date: None,
                },
                current_stock: 10,
            },
        )
        .context("add product")?;

    let sale = service
        .sell_product(
            admin,
            SellProduct {
                product_id: product.id,
                buyer_id: "walk-in".to_string(),
                quantity: 3,
                customer_age: 25,
            },
        )
        .context("sell product")?;

    let product = service.get_product(product.id).context("reload product")?;

    let out = json!({ "product": product, "sale": sale });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
