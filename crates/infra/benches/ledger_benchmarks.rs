use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use liquorledger_auth::{Role, UserPayload};
use liquorledger_core::{LedgerConfig, PageRequest, PrincipalId, ProductId};
use liquorledger_infra::LiquorLedgerService;
use liquorledger_ledger::{AdjustInventory, SellProduct};
use liquorledger_products::{LiquorBrand, LiquorType, ProductDetails, ProductPayload};

/// Service with one staff member and one well-stocked product.
fn setup(products: usize) -> (LiquorLedgerService, PrincipalId, ProductId) {
    let service = LiquorLedgerService::in_memory(LedgerConfig::default());
    let staff = PrincipalId::new();
    service
        .register_user(
            staff,
            staff,
            UserPayload {
                username: "bench_admin".to_string(),
                role: Role::Admin,
                contact_info: "bench".to_string(),
            },
        )
        .unwrap();

    let mut first = None;
    for i in 0..products.max(1) {
        let product = service
            .add_product(
                staff,
                ProductPayload {
                    details: ProductDetails {
                        name: format!("Bench Malt {i}"),
                        liquor_type: LiquorType::Whiskey,
                        brand: LiquorBrand::Other,
                        alcohol_content: 43,
                        batch_number: format!("BM-{i}"),
                        vintage_year: None,
                        bottle_size: "700ml".to_string(),
                        cost_price: 30,
                        retail_price: 50,
                        expiry_date: None,
                    },
                    current_stock: i64::MAX / 2,
                },
            )
            .unwrap();
        first.get_or_insert(product.id);
    }

    (service, staff, first.unwrap())
}

fn bench_sell(c: &mut Criterion) {
    let (service, staff, product_id) = setup(1);

    let mut group = c.benchmark_group("ledger");
    group.throughput(Throughput::Elements(1));
    group.bench_function("sell_one_unit", |b| {
        b.iter(|| {
            service
                .sell_product(
                    staff,
                    black_box(SellProduct {
                        product_id,
                        buyer_id: "bench".to_string(),
                        quantity: 1,
                        customer_age: 30,
                    }),
                )
                .unwrap()
        })
    });
    group.bench_function("adjust_restock", |b| {
        b.iter(|| {
            service
                .adjust_inventory(
                    staff,
                    black_box(AdjustInventory {
                        product_id,
                        quantity_changed: 1,
                        reason: "bench".to_string(),
                    }),
                )
                .unwrap()
        })
    });
    group.finish();
}

fn bench_list_products(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    for size in [100usize, 1_000] {
        let (service, _, _) = setup(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("list_products_page", size), &size, |b, _| {
            b.iter(|| service.list_products(black_box(PageRequest::new(1, 50))).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sell, bench_list_products);
criterion_main!(benches);
