//! Performance benchmarks for TAPESCOPE

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tapescope::{Program, SimClock, TapeModel, TurmiteModel};

fn benchmark_model_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_step");

    for machines in [1, 4, 16].iter() {
        let mut model = TurmiteModel::new();
        for i in 0..*machines {
            model.add_machine(Program::langton(), (i as i64 * 40, 0));
        }

        // Warm up so tapes carry a realistic occupied-cell count
        for _ in 0..500 {
            model.step();
        }

        group.bench_with_input(
            BenchmarkId::new("machines", machines),
            machines,
            |b, _| {
                b.iter(|| {
                    model.step();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_clock_drain(c: &mut Criterion) {
    let mut clock = SimClock::new(2000.0, 2000.0);
    let mut model = TurmiteModel::demo();

    // One 60fps frame at the maximum rate, ~33 ticks per drain
    c.bench_function("clock_drain_frame", |b| {
        b.iter(|| {
            clock.advance(black_box(16.7), &mut model);
        });
    });
}

fn benchmark_snapshot_clone(c: &mut Criterion) {
    let mut model = TurmiteModel::demo();
    for _ in 0..20_000 {
        model.step();
    }

    c.bench_function("snapshot_clone", |b| {
        b.iter(|| black_box(model.clone_model()));
    });
}

criterion_group!(
    benches,
    benchmark_model_step,
    benchmark_clock_drain,
    benchmark_snapshot_clone,
);

criterion_main!(benches);
