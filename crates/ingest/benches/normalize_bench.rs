//! Normalizer hot-path benchmarks: single well-formed item, single rejected
//! item, and a mixed batch.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use tradefeed_ingest::{normalize_batch, normalize_item};

fn well_formed_item() -> Value {
    json!({
        "code": "4311501438306",
        "type": "gtin",
        "comment": "",
        "amount_multiplier": 1,
        "brand": "GUT&GUENSTIG",
        "description": "H-Milch 3,5%",
        "edeka_article_number": "111087",
        "net_weight": { "amount": 1, "unit": 3 },
        "gross_weight": 1.06,
        "packaging": "CT",
        "trade_item_unit_descriptor": "BASE_UNIT_OR_EACH",
        "requires_best_before_date": true,
        "validation_status": "validated",
        "vat": { "DEU": { "label": "DE7", "rate": 19 } },
        "vat_rate": "STANDARD"
    })
}

fn rejected_item() -> Value {
    json!({
        "packaging": "XX",
        "net_weight": "heavy",
        "validation_status": "maybe"
    })
}

fn bench_normalize_item(c: &mut Criterion) {
    let ok = well_formed_item();
    let bad = rejected_item();

    c.bench_function("normalize_item/well_formed", |b| {
        b.iter(|| normalize_item(black_box(&ok)))
    });
    c.bench_function("normalize_item/rejected", |b| {
        b.iter(|| normalize_item(black_box(&bad)))
    });
}

fn bench_normalize_batch(c: &mut Criterion) {
    let items: Vec<Value> = (0..1000)
        .map(|i| {
            if i % 10 == 0 {
                rejected_item()
            } else {
                well_formed_item()
            }
        })
        .collect();

    c.bench_function("normalize_batch/1000_items_10pct_bad", |b| {
        b.iter(|| normalize_batch(black_box(&items)))
    });
}

criterion_group!(benches, bench_normalize_item, bench_normalize_batch);
criterion_main!(benches);
