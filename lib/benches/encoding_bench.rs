use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rya::consts::{XSD_DOUBLE, XSD_INT};
use rya::{
    RowKeyHashing, RyaConfig, RyaIri, RyaStatement, RyaType, TripleContext, TypeRegistry,
};

/// Generate `n` statements with a mix of object datatypes.
fn generate_statements(n: usize) -> Vec<RyaStatement> {
    (0..n)
        .map(|i| {
            let object = match i % 4 {
                0 => RyaType::plain(format!("value {i}")),
                1 => RyaType::new(XSD_INT.into(), (i as i32).to_string()),
                2 => RyaType::new(XSD_DOUBLE.into(), format!("{}.5", i)),
                _ => RyaType::from(RyaIri::new(format!("http://example.org/o/{i}")).unwrap()),
            };
            RyaStatement::builder()
                .subject(RyaIri::new(format!("http://example.org/s/{}", i % 100)).unwrap())
                .predicate(RyaIri::new(format!("http://example.org/p/{}", i % 20)).unwrap())
                .object(object)
                .timestamp(1_700_000_000_000i64 + i as i64)
                .build()
                .unwrap()
        })
        .collect()
}

fn bench_value_roundtrip(c: &mut Criterion) {
    let registry = TypeRegistry::new();
    let values: Vec<RyaType> = generate_statements(1000)
        .iter()
        .map(|s| s.object().clone())
        .collect();
    let encoded: Vec<Vec<u8>> = values
        .iter()
        .map(|v| registry.serialize(v).unwrap())
        .collect();

    let mut group = c.benchmark_group("value");
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("serialize", |b| {
        b.iter(|| {
            for v in &values {
                std::hint::black_box(registry.serialize(v).unwrap());
            }
        })
    });
    group.bench_function("deserialize", |b| {
        b.iter(|| {
            for bytes in &encoded {
                std::hint::black_box(registry.deserialize(bytes).unwrap());
            }
        })
    });
    group.finish();
}

fn bench_triple_rows(c: &mut Criterion) {
    let statements = generate_statements(1000);
    let mut group = c.benchmark_group("triple_rows");
    group.throughput(Throughput::Elements(statements.len() as u64));
    for hashing in [RowKeyHashing::Disabled, RowKeyHashing::Enabled] {
        let context = TripleContext::new(&RyaConfig::new(hashing, "rya_"));
        let label = if hashing.is_enabled() { "hashed" } else { "plain" };
        group.bench_function(BenchmarkId::new("serialize", label), |b| {
            b.iter(|| {
                for s in &statements {
                    std::hint::black_box(context.serialize_triple(s).unwrap());
                }
            })
        });
        let rows: Vec<_> = statements
            .iter()
            .map(|s| context.serialize_triple(s).unwrap())
            .collect();
        group.bench_function(BenchmarkId::new("deserialize", label), |b| {
            b.iter(|| {
                for row_map in &rows {
                    for (&layout, row) in row_map {
                        std::hint::black_box(context.deserialize_triple(layout, row).unwrap());
                    }
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_value_roundtrip, bench_triple_rows);
criterion_main!(benches);
