use std::hint::black_box;
use std::sync::Arc;

use codec_sanitize::{Options, Registry, Value, sanitize_json, sanitize_numbers};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;

fn registry() -> Arc<Registry> {
    let mut registry = Registry::new("bench");
    registry
        .register_all_json(&json!({
            "Balance": "u128",
            "Lock": {"_enum": {"Active": "Null", "Locked": "Balance"}},
            "AccountData": {"free": "Balance", "reserved": "Balance", "lock": "Lock"}
        }))
        .unwrap();
    registry.into_shared()
}

fn accounts(registry: &Arc<Registry>, n: usize) -> Value {
    let literal: serde_json::Map<String, serde_json::Value> = (0..n)
        .map(|i| {
            let key = format!("0x{:064x}", i);
            let data = json!({
                "free": format!("{}", (i as u128) << 80),
                "reserved": i,
                "lock": if i % 2 == 0 { json!("Active") } else { json!({"Locked": i}) }
            });
            (key, data)
        })
        .collect();
    let map = registry
        .create_type("BTreeMap<AccountId, AccountData>", &serde_json::Value::Object(literal))
        .unwrap();
    Value::object([("at", Value::from(json!({"height": 1}))), ("accounts", Value::Codec(map))])
}

fn plain_json(rows: usize) -> serde_json::Value {
    let items: Vec<serde_json::Value> = (0..rows)
        .map(|i| json!({"id": i, "name": format!("row{}", i), "tags": ["a", "b"], "ok": i % 3 == 0}))
        .collect();
    json!({ "rows": items })
}

fn bench_sanitize(c: &mut Criterion) {
    let registry = registry();
    let mut group = c.benchmark_group("sanitize");

    for n in [10usize, 1_000] {
        let value = accounts(&registry, n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("accounts_{n}"), |b| {
            b.iter(|| sanitize_numbers(black_box(&value)).unwrap())
        });
    }

    let plain = plain_json(1_000);
    let options = Options::default();
    group.bench_function("plain_json_1k", |b| {
        b.iter_batched(
            || plain.clone(),
            |v| sanitize_json(black_box(&v), &options).unwrap(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_sanitize);
criterion_main!(benches);
