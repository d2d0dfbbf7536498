//! Criterion benchmarks for link injection.
//!
//! Fixtures are built outside the benchmark loop so only serialization, the
//! tree walk and re-encoding are measured.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde::Serialize;

use hateoas_links::{inject_links, record_links, LinkOption, LinkRegistry};

#[derive(Serialize, Default)]
struct Cupcake {
    id: u64,
    name: String,
}

record_links!(Cupcake { id, name });

#[derive(Serialize, Default)]
struct Bakery {
    id: u64,
    cupcakes: Vec<Cupcake>,
}

record_links!(Bakery { id, cupcakes });

fn registry() -> LinkRegistry {
    let registry = LinkRegistry::new();
    registry.register(
        &Cupcake::default(),
        [
            LinkOption::self_link("/api/v1/cupcakes/{id}", "get a cupcake"),
            LinkOption::put("/api/v1/cupcakes/{id}", "update a cupcake"),
            LinkOption::delete("/api/v1/cupcakes?id={id}", "delete a cupcake"),
        ],
    );
    registry.register(
        &Bakery::default(),
        [
            LinkOption::self_link("/api/v1/bakeries/{id}", "get a bakery"),
            LinkOption::index("/api/v1/bakeries", "get all bakeries"),
        ],
    );
    registry
}

fn bakeries(count: u64, cupcakes_each: u64) -> Vec<Bakery> {
    (0..count)
        .map(|id| Bakery {
            id,
            cupcakes: (0..cupcakes_each)
                .map(|c| Cupcake {
                    id: id * 1000 + c,
                    name: format!("cupcake-{c}"),
                })
                .collect(),
        })
        .collect()
}

fn bench_inject_single(c: &mut Criterion) {
    let registry = registry();
    let bakery = Bakery {
        id: 1,
        cupcakes: Vec::new(),
    };

    c.bench_function("inject/single", |b| {
        b.iter(|| inject_links(black_box(&registry), black_box(&bakery)))
    });
}

fn bench_inject_nested(c: &mut Criterion) {
    let registry = registry();
    let input = bakeries(50, 20);

    c.bench_function("inject/nested_50x20", |b| {
        b.iter(|| inject_links(black_box(&registry), black_box(&input)))
    });
}

fn bench_plain_serialization(c: &mut Criterion) {
    let input = bakeries(50, 20);

    c.bench_function("plain/nested_50x20", |b| {
        b.iter(|| serde_json::to_vec(black_box(&input)).unwrap())
    });
}

fn bench_unregistered(c: &mut Criterion) {
    let registry = LinkRegistry::new();
    let input = bakeries(50, 20);

    c.bench_function("inject/unregistered_50x20", |b| {
        b.iter(|| inject_links(black_box(&registry), black_box(&input)))
    });
}

criterion_group!(
    benches,
    bench_inject_single,
    bench_inject_nested,
    bench_plain_serialization,
    bench_unregistered
);
criterion_main!(benches);
