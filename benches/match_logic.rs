use criterion::{black_box, criterion_group, criterion_main, Criterion};
use m4tch::core::{score_for, ColorRng, GameState, Grid, ScoreContext, ScriptedColors, Tile};
use m4tch::types::{Coord, Tier, TileColor, TICK_MS};

fn grown_board() -> Grid {
    Grid::from_tiles(std::array::from_fn(|i| {
        Tile::grown(Tier::One, TileColor::Red, Coord::from_index(i))
    }))
}

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(TICK_MS));
        })
    });
}

fn bench_combine(c: &mut Criterion) {
    c.bench_function("combine_pair", |b| {
        b.iter(|| {
            let mut state = GameState::with_grid(
                grown_board(),
                ScriptedColors::constant(TileColor::Blue),
                60_000,
            );
            state.start();
            state.submit_selection(black_box(0), 0);
            state.submit_selection(black_box(1), 0);
            state.score()
        })
    });
}

fn bench_pointer_hit(c: &mut Criterion) {
    let grid = grown_board();

    c.bench_function("pointer_hit_shared_corner", |b| {
        b.iter(|| grid.pointer_hit(black_box(2.0), black_box(2.0), |t| t.is_fully_visible()))
    });
}

fn bench_initialize(c: &mut Criterion) {
    let mut colors = ColorRng::new(7);

    c.bench_function("grid_initialize", |b| {
        b.iter(|| Grid::initialize(&mut colors))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut snap = state.snapshot();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(black_box(&mut snap));
        })
    });
}

fn bench_score_table(c: &mut Criterion) {
    let ctx = ScoreContext {
        all_power_ups: true,
        combo_multiplier: true,
        red_chain: true,
    };

    c.bench_function("score_for", |b| {
        b.iter(|| score_for(black_box(Tier::Star), black_box(TileColor::Red), ctx))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_combine,
    bench_pointer_hit,
    bench_initialize,
    bench_snapshot,
    bench_score_table
);
criterion_main!(benches);
