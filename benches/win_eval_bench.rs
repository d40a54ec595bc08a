use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xuezhan_host::game::win_eval::{evaluate_ting, evaluate_win};
use xuezhan_host::tile::{Hand, Tile};

fn bench_evaluate_win_standard(c: &mut Criterion) {
    let mut hand = Hand::new();
    // 四刻一对
    for value in [1, 2, 3] {
        for _ in 0..3 {
            hand.add_tile(Tile::Bamboo(value));
        }
    }
    for _ in 0..3 {
        hand.add_tile(Tile::Dot(5));
    }
    hand.add_tile(Tile::Dot(9));
    hand.add_tile(Tile::Dot(9));

    c.bench_function("evaluate_win_standard", |b| {
        b.iter(|| {
            black_box(evaluate_win(black_box(&hand), &[], None));
        });
    });
}

fn bench_evaluate_win_seven_pairs(c: &mut Criterion) {
    let mut hand = Hand::new();
    for value in 1..=7 {
        hand.add_tile(Tile::Character(value));
        hand.add_tile(Tile::Character(value));
    }

    c.bench_function("evaluate_win_seven_pairs", |b| {
        b.iter(|| {
            black_box(evaluate_win(black_box(&hand), &[], None));
        });
    });
}

fn bench_evaluate_ting(c: &mut Criterion) {
    let mut hand = Hand::new();
    // 十三张听两面
    for value in [1, 2, 3] {
        for _ in 0..3 {
            hand.add_tile(Tile::Bamboo(value));
        }
    }
    hand.add_tile(Tile::Dot(5));
    hand.add_tile(Tile::Dot(5));
    hand.add_tile(Tile::Dot(8));
    hand.add_tile(Tile::Dot(8));

    c.bench_function("evaluate_ting", |b| {
        b.iter(|| {
            black_box(evaluate_ting(black_box(&hand), &[], None));
        });
    });
}

criterion_group!(
    benches,
    bench_evaluate_win_standard,
    bench_evaluate_win_seven_pairs,
    bench_evaluate_ting
);
criterion_main!(benches);
