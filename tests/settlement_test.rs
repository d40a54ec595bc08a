//! 结算规则测试：番数换算、三种结算场景的零和性

use xuezhan_host::game::{
    evaluate_win, points_for_win, ScoreLedger, Seat, WinCategory, STARTING_SCORE, TING_PENALTY,
};
use xuezhan_host::tile::Tile;

fn four_seats() -> Vec<Seat> {
    (0..4u8)
        .map(|i| Seat::new(i, format!("bot-{i}"), format!("电脑 {}", i + 1), true))
        .collect()
}

/// 十三张听牌型：三个刻子 + 两个对子
fn fill_ting_hand(seat: &mut Seat) {
    for value in [1, 2, 3] {
        for _ in 0..3 {
            seat.hand.add_tile(Tile::Bamboo(value));
        }
    }
    seat.hand.add_tile(Tile::Dot(5));
    seat.hand.add_tile(Tile::Dot(5));
    seat.hand.add_tile(Tile::Dot(8));
    seat.hand.add_tile(Tile::Dot(8));
}

/// 十三张乱牌：凑不出任何叫
fn fill_junk_hand(seat: &mut Seat) {
    for value in 1..=9 {
        seat.hand.add_tile(Tile::Character(value));
    }
    for value in 1..=4 {
        seat.hand.add_tile(Tile::Dot(value));
    }
}

#[test]
fn test_points_double_on_self_draw() {
    assert_eq!(points_for_win(1, false), 2);
    assert_eq!(points_for_win(1, true), 4);
    assert_eq!(points_for_win(4, false), 16);
    assert_eq!(points_for_win(4, true), 32);
}

#[test]
fn test_seven_pairs_fan_values() {
    // 清一色七对 4 番，杂色七对 2 番
    let mut mono = Seat::new(0, "a", "甲", false);
    for value in 1..=7 {
        mono.hand.add_tile(Tile::Dot(value));
        mono.hand.add_tile(Tile::Dot(value));
    }
    let eval = evaluate_win(&mono.hand, &[], None);
    assert_eq!(eval.category, Some(WinCategory::SevenPairs));
    assert_eq!(eval.fan, 4);
    assert_eq!(points_for_win(eval.fan, false), 16);
}

#[test]
fn test_discard_hu_moves_exact_points() {
    let mut seats = four_seats();
    let entries = ScoreLedger::settle_discard_hu(&mut seats, 2, 0, 3);

    assert_eq!(seats[2].score, STARTING_SCORE + 8);
    assert_eq!(seats[0].score, STARTING_SCORE - 8);
    assert_eq!(seats[1].score, STARTING_SCORE);
    assert_eq!(seats[3].score, STARTING_SCORE);
    assert_eq!(entries.iter().map(|e| e.points).sum::<i32>(), 0);
}

#[test]
fn test_self_draw_splits_across_payers() {
    let mut seats = four_seats();
    // 5 番自摸：每家 64，共 192
    let entries = ScoreLedger::settle_self_draw(&mut seats, 1, 5);

    assert_eq!(seats[1].score, STARTING_SCORE + 192);
    for id in [0usize, 2, 3] {
        assert_eq!(seats[id].score, STARTING_SCORE - 64);
    }
    assert_eq!(entries.len(), 4);
    assert_eq!(entries.iter().map(|e| e.points).sum::<i32>(), 0);
}

#[test]
fn test_deck_empty_two_versus_two() {
    let mut seats = four_seats();
    fill_ting_hand(&mut seats[0]);
    fill_ting_hand(&mut seats[1]);
    fill_junk_hand(&mut seats[2]);
    fill_junk_hand(&mut seats[3]);

    let entries = ScoreLedger::settle_deck_empty(&mut seats);

    // 两家未叫各赔两家听牌 8 分：±16
    assert_eq!(seats[0].score, STARTING_SCORE + 16);
    assert_eq!(seats[1].score, STARTING_SCORE + 16);
    assert_eq!(seats[2].score, STARTING_SCORE - 16);
    assert_eq!(seats[3].score, STARTING_SCORE - 16);
    assert_eq!(entries.iter().map(|e| e.points).sum::<i32>(), 0);

    // 罚分基数与查叫标志
    assert_eq!(TING_PENALTY, 8);
    assert!(seats[0].is_ting && seats[1].is_ting);
    assert!(!seats[2].is_ting && !seats[3].is_ting);
}

#[test]
fn test_deck_empty_ignores_out_seats() {
    let mut seats = four_seats();
    seats[0].is_out = true;
    fill_ting_hand(&mut seats[1]);
    fill_junk_hand(&mut seats[2]);
    fill_junk_hand(&mut seats[3]);

    let entries = ScoreLedger::settle_deck_empty(&mut seats);

    // 离场座位不参与查叫
    assert_eq!(seats[0].score, STARTING_SCORE);
    assert!(!seats[0].is_ting);
    assert_eq!(seats[1].score, STARTING_SCORE + 16);
    assert_eq!(entries.iter().map(|e| e.points).sum::<i32>(), 0);
}
