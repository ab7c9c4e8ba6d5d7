use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cashflow_engine::games::standard::StandardGameBuilder;
use cashflow_engine::{play_turn, run_game, CautiousAgent, PlayerAgent, PlayerMap};

fn agents(n: usize) -> PlayerMap<Box<dyn PlayerAgent>> {
    PlayerMap::new(n, |_| Box::new(CautiousAgent::default()) as Box<dyn PlayerAgent>)
}

fn benchmark_full_game(c: &mut Criterion) {
    c.bench_function("autoplay_4p_200_turns", |b| {
        b.iter(|| {
            let mut state = StandardGameBuilder::new().player_count(4).build(black_box(7)).unwrap();
            let result = run_game(&mut state, &mut agents(4), 200).unwrap();
            black_box(result);
        });
    });
}

fn benchmark_single_turn(c: &mut Criterion) {
    c.bench_function("play_turn_1000", |b| {
        b.iter(|| {
            let mut state = StandardGameBuilder::new().player_count(2).build(black_box(11)).unwrap();
            let mut agent = CautiousAgent::default();
            for _ in 0..1000 {
                if state.is_over() {
                    break;
                }
                play_turn(&mut state, &mut agent).unwrap();
            }
        });
    });
}

fn benchmark_state_clone(c: &mut Criterion) {
    let mut state = StandardGameBuilder::new().player_count(6).build(3).unwrap();
    let _ = run_game(&mut state, &mut agents(6), 100);

    c.bench_function("state_clone_after_100_turns", |b| {
        b.iter(|| black_box(state.clone()));
    });
}

criterion_group!(benches, benchmark_full_game, benchmark_single_turn, benchmark_state_clone);
criterion_main!(benches);
