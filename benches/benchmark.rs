use criterion::{criterion_group, criterion_main, Criterion};
use kgc::{bin_index, gc_fraction, KmerClass};

fn criterion_benchmark(c: &mut Criterion) {
    let kmer = "AACCTGAACCTGACGTTGCA";
    c.bench_function("gc bin of 20mer", |b| {
        b.iter(|| bin_index(gc_fraction(kmer).unwrap_or_default()))
    });
    c.bench_function("class of 20mer", |b| b.iter(|| KmerClass::new(kmer)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
