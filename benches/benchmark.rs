use criterion::{criterion_group, criterion_main, Criterion};

use chrono::{Duration, NaiveDate};

use numbl::GRID_SIZE;
use numbl::game::Game;
use numbl::generator::{Generator, generate_daily};

const SWEEP_DAYS: i64 = 365;

// Explanation of benchmark classes:
//
// daily generation: Generating the puzzle for a single fixed date, the cost
//                   paid once on every app start.
// yearly generation: Generating the puzzles of a full year, dominated by the
//                    constraint selection draws.
// guess evaluation: Submitting a single full board, evaluating all eight
//                   lines at once.
// scoring: Computing the full score breakdown of a completed session.

fn completed_game() -> Game {
    let puzzle = generate_daily("2025-06-15").unwrap();
    let mut game = Game::new(puzzle);

    for row in 0..GRID_SIZE {
        for column in 0..GRID_SIZE {
            if game.is_given(column, row).unwrap() {
                continue;
            }

            let digit = game.puzzle().solution()
                .get_cell(column, row).unwrap().unwrap();
            game.set_cell(column, row, digit).unwrap();
        }
    }

    game
}

fn benchmark_daily_generation(c: &mut Criterion) {
    c.bench_function("daily generation", |b|
        b.iter(|| generate_daily("2025-06-15").unwrap()));
}

fn benchmark_yearly_generation(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    c.bench_function("yearly generation", |b|
        b.iter(|| {
            for offset in 0..SWEEP_DAYS {
                let date = start + Duration::days(offset);
                Generator::new(date).generate();
            }
        }));
}

fn benchmark_guess_evaluation(c: &mut Criterion) {
    let game = completed_game();

    c.bench_function("guess evaluation", |b|
        b.iter(|| {
            let mut game = game.clone();
            game.submit_guess()
        }));
}

fn benchmark_scoring(c: &mut Criterion) {
    let mut game = completed_game();
    game.submit_guess();
    game.set_time(95);

    c.bench_function("scoring", |b| b.iter(|| game.score()));
}

criterion_group!(all,
    benchmark_daily_generation,
    benchmark_yearly_generation,
    benchmark_guess_evaluation,
    benchmark_scoring
);

criterion_main!(all);
