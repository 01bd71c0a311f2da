use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use stablematch::{GeneratorConfig, InstanceGenerator, StabilityVerifier, StableMatcher};

fn bench_matching_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching_scaling");

    for n in [16usize, 64, 256] {
        let instance = InstanceGenerator::generate(GeneratorConfig {
            n,
            seed: Some(42),
        })
        .expect("instance");

        group.bench_with_input(BenchmarkId::new("match", n), &instance, |b, instance| {
            b.iter(|| {
                let outcome = StableMatcher::run(instance);
                black_box(outcome);
            });
        });

        let pairing = StableMatcher::run(&instance).pairing;
        group.bench_with_input(BenchmarkId::new("verify", n), &instance, |b, instance| {
            b.iter(|| {
                let verdict = StabilityVerifier::verify(instance, &pairing);
                black_box(verdict);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matching_scaling);
criterion_main!(benches);
