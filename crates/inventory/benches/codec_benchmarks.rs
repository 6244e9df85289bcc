use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use stockkeep_inventory::{decode, encode, filter, Condition, InventoryItem, ItemQuery};

fn sample_items(n: usize) -> Vec<InventoryItem> {
    (0..n)
        .map(|i| {
            let condition = Condition::ALL[i % Condition::ALL.len()];
            InventoryItem::new(format!("SKU{:05}", i % 100), i as i32, condition, 5, 20, i % 2 == 0)
        })
        .collect()
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let payload = json!({
        "sku": "FAKE1234",
        "count": 10,
        "condition": "OpenBox",
        "restock_level": 2,
        "restock_amount": 20,
        "in_stock": "yes"
    });

    group.bench_function("decode", |b| b.iter(|| decode(black_box(&payload))));

    let item = InventoryItem::new("FAKE1234", 10, Condition::Used, 2, 20, true);
    group.bench_function("encode", |b| b.iter(|| encode(black_box(&item))));

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    for size in [100usize, 10_000] {
        let items = sample_items(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("by_sku", size), &items, |b, items| {
            let query = ItemQuery::by_sku("SKU00042");
            b.iter(|| filter(black_box(items), &query))
        });

        group.bench_with_input(BenchmarkId::new("by_condition", size), &items, |b, items| {
            let query = ItemQuery::by_condition("Used");
            b.iter(|| filter(black_box(items), &query))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec, bench_filter);
criterion_main!(benches);
