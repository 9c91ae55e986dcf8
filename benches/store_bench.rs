//! Insert and query throughput of the in-memory store.
//!
//! Run with: cargo bench --bench store_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qstore::{Assertion, QStore, StoreConfig, Triple, TriplePattern};

const GRAPHS: [&str; 4] = [
    "http://example.org/graph0",
    "http://example.org/graph1",
    "http://example.org/graph2",
    "http://example.org/graph3",
];

/// Sensor-like statements: 1000 subjects, 50 predicates, 2000 objects.
fn generate_triples(count: usize) -> Vec<Triple<String>> {
    (0..count)
        .map(|i| {
            Triple::new(
                format!("http://example.org/sensor/{}", i % 1000),
                format!("http://example.org/property/{}", i % 50),
                format!("\"{}\"", i % 2000),
            )
        })
        .collect()
}

fn populated_store(triples: &[Triple<String>]) -> QStore<String> {
    let mut store = QStore::with_config(StoreConfig { id_seed: Some(42), ..Default::default() });
    for (i, triple) in triples.iter().enumerate() {
        let graph = (i % 10 == 0).then(|| GRAPHS[i % GRAPHS.len()].to_string());
        store.add(triple, graph.as_ref(), Assertion::Asserted).unwrap();
    }
    store
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for size in [1_000, 10_000, 100_000].iter() {
        let triples = generate_triples(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| populated_store(&triples));
        });
    }

    group.finish();
}

fn bench_triples(c: &mut Criterion) {
    let mut group = c.benchmark_group("triples");
    let store = populated_store(&generate_triples(100_000));

    let subject = Some("http://example.org/sensor/7".to_string());
    let predicate = Some("http://example.org/property/7".to_string());

    group.bench_function("subject_bound", |b| {
        let pattern = TriplePattern::new(subject.clone(), None, None);
        b.iter(|| store.triples(&pattern, None).unwrap());
    });
    group.bench_function("subject_predicate_bound", |b| {
        let pattern = TriplePattern::new(subject.clone(), predicate.clone(), None);
        b.iter(|| store.triples(&pattern, None).unwrap());
    });
    group.bench_function("context_scan", |b| {
        let graph = GRAPHS[0].to_string();
        b.iter(|| store.triples(&TriplePattern::any(), Some(&graph)).unwrap());
    });

    group.finish();
}

fn bench_remove_context(c: &mut Criterion) {
    let triples = generate_triples(10_000);

    c.bench_function("remove_context", |b| {
        b.iter_batched(
            || populated_store(&triples),
            |mut store| store.remove(&TriplePattern::any(), Some(&GRAPHS[0].to_string())),
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_add, bench_triples, bench_remove_context);
criterion_main!(benches);
