use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pgulid::{ops, Generator, Timestamp, Ulid};

fn generate_benchmark(c: &mut Criterion) {
    c.bench_function("ulid", |b| b.iter(pgulid::ulid));

    let mut g = Generator::with_rand08(rand::thread_rng());
    c.bench_function("Generator::generate", |b| b.iter(|| g.generate()));

    let ts = Timestamp::from_micros(562_123_776_371_000);
    c.bench_function("ulid_from_timestamp", |b| {
        b.iter(|| pgulid::ulid_from_timestamp(black_box(ts)))
    });
}

fn codec_benchmark(c: &mut Criterion) {
    let value: Ulid = "01BX5ZZKBKACTAV9WEVGEMMVRY".parse().unwrap();
    c.bench_function("Ulid::encode", |b| b.iter(|| black_box(value).encode()));
    c.bench_function("Ulid::parse_str", |b| {
        b.iter(|| Ulid::parse_str(black_box("01BX5ZZKBKACTAV9WEVGEMMVRY")))
    });
    c.bench_function("ops::compare", |b| {
        b.iter(|| ops::compare(black_box(&value), black_box(&Ulid::MAX)))
    });
    c.bench_function("ops::hash", |b| b.iter(|| ops::hash(black_box(&value))));
}

criterion_group!(benches, generate_benchmark, codec_benchmark);
criterion_main!(benches);
