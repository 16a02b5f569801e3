use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use lectic::{ConceptEnumerator, Context, GaloisClosure, LatticeBuilder};

// A reproducible context where roughly `percent` of the pairs hold.
fn random_context(objects: u32, attributes: u32, percent: u64) -> Context {
    let table: Vec<Vec<bool>> = (0..objects)
        .map(|o| {
            (0..attributes)
                .map(|a| seahash::hash(format!("{o}:{a}").as_bytes()) % 100 < percent)
                .collect()
        })
        .collect();
    Context::from_table(
        (0..objects).map(|o| format!("g{o}")),
        (0..attributes).map(|a| format!("m{a}")),
        table,
    )
    .unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let small = random_context(50, 12, 30);
    let medium = random_context(500, 18, 25);
    println!("small: {} concepts", ConceptEnumerator::new(&small).count());
    println!("medium: {} concepts", ConceptEnumerator::new(&medium).count());

    let closure = GaloisClosure::new(&medium);
    let some = medium.attribute_set(["m1", "m4"]).unwrap();
    c.bench_function("closure 500x18", |b| b.iter(|| closure.attribute_closure(black_box(&some))));

    c.bench_function("enumerate 50x12", |b| {
        b.iter(|| ConceptEnumerator::new(black_box(&small)).count())
    });
    c.bench_function("enumerate 500x18", |b| {
        b.iter(|| ConceptEnumerator::new(black_box(&medium)).count())
    });

    let concepts: Vec<_> = ConceptEnumerator::new(&medium).collect();
    c.bench_function("covers sequential 500x18", |b| {
        b.iter(|| LatticeBuilder::new().parallel(false).build(concepts.clone()))
    });
    c.bench_function("covers parallel 500x18", |b| {
        b.iter(|| {
            LatticeBuilder::new()
                .parallel(true)
                .parallel_threshold(0)
                .build(concepts.clone())
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
