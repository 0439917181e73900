// Benchmarks for similarity and puzzle generation at realistic pool sizes
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use embedquest_core::{cosine_similarity, PuzzleGenerator, SeededRandom, Word};
use rand::prelude::*;

fn generate_random_embedding(rng: &mut StdRng, dim: usize) -> Vec<f32> {
    (0..dim).map(|_| rng.random_range(-1.0f32..1.0f32)).collect()
}

fn generate_pool(size: usize, dim: usize) -> Vec<Word> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..size)
        .map(|i| Word::new(format!("word{}", i), generate_random_embedding(&mut rng, dim)))
        .collect()
}

fn benchmark_cosine(c: &mut Criterion) {
    let mut group = c.benchmark_group("cosine_similarity");
    let mut rng = StdRng::seed_from_u64(7);

    for dim in [128, 384, 768].iter() {
        let a = generate_random_embedding(&mut rng, *dim);
        let b = generate_random_embedding(&mut rng, *dim);
        group.bench_with_input(BenchmarkId::new("f64_accumulate", dim), dim, |bench, _| {
            bench.iter(|| cosine_similarity(black_box(&a), black_box(&b)))
        });
    }

    group.finish();
}

fn benchmark_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_puzzle");
    let generator = PuzzleGenerator::default();

    for size in [10, 30, 100].iter() {
        let pool = generate_pool(*size, 384);
        group.bench_with_input(BenchmarkId::new("pool", size), size, |bench, _| {
            let mut rng = SeededRandom::new(1);
            bench.iter(|| generator.generate(black_box(&pool), &mut rng).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_cosine, benchmark_generate);
criterion_main!(benches);
