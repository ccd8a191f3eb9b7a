use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::sync::Arc;
use tokio::runtime::Runtime;

use tien_len::{
    classify, standard_deck, Card, DealOverrides, GameEngine, MemoryStore, PlayerId, Rank, Seat,
    Suit,
};

fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|code| code.parse().unwrap()).collect()
}

fn table_of(count: usize) -> Vec<PlayerId> {
    (0..count).map(|idx| format!("player{idx}")).collect()
}

/// Ascending run of singles starting from the three, suits rotating
fn run_of_singles(len: usize) -> Vec<Card> {
    (0..len)
        .map(|idx| Card(Rank::ALL[idx], Suit::ALL[idx % 4]))
        .collect()
}

/// Benchmark comparing every ordered pair of the deck
fn bench_compare_deck_pairs(c: &mut Criterion) {
    let deck = standard_deck();

    c.bench_function("compare_deck_pairs", |b| {
        b.iter(|| {
            deck.iter()
                .flat_map(|low| deck.iter().map(move |high| low.cmp(high)))
                .filter(|ordering| ordering.is_lt())
                .count()
        });
    });
}

/// Benchmark sorting a full deck from reversed order
fn bench_sort_full_deck(c: &mut Criterion) {
    let mut deck = standard_deck();
    deck.reverse();

    c.bench_function("sort_full_deck", |b| {
        b.iter(|| {
            let mut shuffled = deck.clone();
            shuffled.sort_unstable();
            shuffled
        });
    });
}

/// Benchmark classifying a pair (smallest multi-card input)
fn bench_classify_pair(c: &mut Criterion) {
    let pair = cards(&["S7", "D7"]);

    c.bench_function("classify_pair", |b| {
        b.iter(|| classify(&pair));
    });
}

/// Benchmark classifying a nine-card run of triples
fn bench_classify_triple_run(c: &mut Criterion) {
    let run = cards(&["S3", "D3", "H3", "S4", "D4", "H4", "S5", "D5", "H5"]);

    c.bench_function("classify_triple_run_9_cards", |b| {
        b.iter(|| classify(&run));
    });
}

/// Benchmark run classification across input lengths
fn bench_classify_run_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_run_of_singles");

    for len in [3, 6, 9, 12] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{len}_cards")),
            &len,
            |b, &len| {
                let run = run_of_singles(len);
                b.iter(|| classify(&run));
            },
        );
    }

    group.finish();
}

/// Benchmark the full play path: gates, classification, and the batch move
fn bench_play_opening_pair(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let pair = cards(&["S3", "D3"]);

    c.bench_function("play_opening_pair", |b| {
        b.iter_batched(
            || {
                let engine = GameEngine::new(Arc::new(MemoryStore::new()), 5);
                let overrides = DealOverrides {
                    hands: Some(vec![
                        cards(&["S3", "D3", "S7"]),
                        cards(&["C4"]),
                        cards(&["D4"]),
                        cards(&["H4"]),
                    ]),
                    ..DealOverrides::default()
                };
                runtime
                    .block_on(engine.initialize("bench-play", &table_of(4), overrides))
                    .unwrap();
                engine
            },
            |engine| {
                runtime
                    .block_on(engine.play_cards("bench-play", Seat::ALL[0], &pair))
                    .unwrap()
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark view generation at both common deal sizes
fn bench_view_generation(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let mut group = c.benchmark_group("view_generation");

    for hand_size in [5u8, 13] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{hand_size}_cards")),
            &hand_size,
            |b, &hand_size| {
                let engine = GameEngine::new(Arc::new(MemoryStore::new()), hand_size);
                runtime
                    .block_on(engine.initialize("bench-views", &table_of(4), DealOverrides::default()))
                    .unwrap();
                b.iter(|| {
                    runtime
                        .block_on(engine.view_for("bench-views", Some(Seat::ALL[0])))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    card_ordering,
    bench_compare_deck_pairs,
    bench_sort_full_deck,
);

criterion_group!(
    classification,
    bench_classify_pair,
    bench_classify_triple_run,
    bench_classify_run_lengths,
);

criterion_group!(
    round_operations,
    bench_play_opening_pair,
    bench_view_generation,
);

criterion_main!(card_ordering, classification, round_operations);
