use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use textbuffer::{Action, BufferState, MoveDir};

fn movement_horizontal(c: &mut Criterion) {
    let mut group = c.benchmark_group("movement_horizontal");

    let setup_wrapped_paragraph = || {
        let line = "word ".repeat(100);
        let text = std::iter::repeat(line).take(50).collect::<Vec<_>>().join("\n");
        BufferState::new(&text, 0)
    };

    group.bench_function("move_right_1000", |b| {
        b.iter_batched(
            setup_wrapped_paragraph,
            |mut state| {
                for _ in 0..1000 {
                    let layout = textbuffer::layout::compute_layout(&state.lines, state.cursor, 80);
                    state = textbuffer::engine::apply(&state, Action::Move(MoveDir::Right), &layout);
                }
                black_box(state)
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn movement_vertical(c: &mut Criterion) {
    let mut group = c.benchmark_group("movement_vertical");

    let setup_deep_buffer = || {
        let lines: Vec<String> = (0..10_000)
            .map(|i| "a".repeat((i % 80) + 10))
            .collect();
        BufferState::new(&lines.join("\n"), 0)
    };

    group.bench_function("move_down_1000", |b| {
        b.iter_batched(
            setup_deep_buffer,
            |mut state| {
                for _ in 0..1000 {
                    let layout = textbuffer::layout::compute_layout(&state.lines, state.cursor, 80);
                    state = textbuffer::engine::apply(&state, Action::Move(MoveDir::Down), &layout);
                }
                black_box(state)
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, movement_horizontal, movement_vertical);
criterion_main!(benches);
