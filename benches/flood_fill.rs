use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use mines_core::GameEngine;

fn worst_case_cascade(c: &mut Criterion) {
    c.bench_function("reveal 64-cell blank board", |b| {
        b.iter_batched(
            || GameEngine::with_mines(&[]).unwrap(),
            |mut engine| engine.primary_action((0, 0)).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, worst_case_cascade);
criterion_main!(benches);
