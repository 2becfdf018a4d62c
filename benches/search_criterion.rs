use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use gambit_core::game_state::chess_types::Color;
use gambit_core::game_state::game_state::GameState;
use gambit_core::search::minimax::{search_best_move, SearchContext};

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_start_position");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for depth in 1..=3u8 {
        let mut game = GameState::new_game();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, depth| {
            b.iter(|| {
                let mut ctx = SearchContext::default();
                let result = search_best_move(black_box(&mut game), Color::White, *depth, &mut ctx)
                    .expect("search benchmark run should succeed");
                black_box(result.best_move)
            });
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
