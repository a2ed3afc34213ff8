use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_blockfall::core::{get_shape, CollapsePlan, Field, GamePhase, GameState};
use tui_blockfall::term::PaintBuffer;
use tui_blockfall::types::{Direction, PieceKind, RotateDirection, Rotation};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.request_start();

    c.bench_function("game_tick_5ms", |b| {
        b.iter(|| {
            if state.phase() == GamePhase::Idle {
                state.request_start();
            }
            let _ = state.tick(black_box(5));
        })
    });
}

fn bench_tick_observed(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    let paint = PaintBuffer::shared(state.field().width(), state.field().height());
    state.set_cell_observer(Box::new(paint.clone()));
    state.request_start();

    c.bench_function("game_tick_5ms_painted", |b| {
        b.iter(|| {
            if state.phase() == GamePhase::Idle {
                state.request_start();
            }
            let _ = state.tick(black_box(5));
        })
    });
}

fn bench_collapse(c: &mut Criterion) {
    c.bench_function("collapse_4_rows", |b| {
        b.iter(|| {
            let mut field = Field::new(10, 18);
            for y in 0..4 {
                for x in 0..10 {
                    let _ = field.set(x, y, Some(PieceKind::I));
                }
            }
            let _ = field.set(3, 4, Some(PieceKind::T));
            let plan = CollapsePlan::scan(&field);
            let _ = plan.clear_full_rows(&mut field);
            let _ = plan.commit(&mut field);
            black_box(field.grid().occupied_count())
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut field = Field::new(10, 18);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            field.spawn(black_box(PieceKind::T));
        })
    });
}

fn bench_can_translate(c: &mut Criterion) {
    let mut field = Field::new(10, 18);
    field.spawn(PieceKind::L);

    c.bench_function("can_translate", |b| b.iter(|| field.can_translate(black_box(Direction::Down))));
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut field = Field::new(10, 18);
    field.spawn(PieceKind::I);

    c.bench_function("try_rotate", |b| b.iter(|| field.try_rotate(black_box(RotateDirection::Right))));
}

fn bench_get_shape(c: &mut Criterion) {
    c.bench_function("get_shape_all", |b| {
        b.iter(|| {
            for kind in PieceKind::ALL {
                black_box(get_shape(kind, black_box(Rotation::West)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_tick_observed,
    bench_collapse,
    bench_spawn,
    bench_can_translate,
    bench_try_rotate,
    bench_get_shape
);
criterion_main!(benches);
