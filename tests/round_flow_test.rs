//! 完整对局流程测试：四个机器人从组局打到结算

use xuezhan_host::game::{Action, STARTING_SCORE};
use xuezhan_host::host::{HostRoom, Message, Publisher};
use xuezhan_host::{Phase, Tile};

struct NoReplicas;

impl Publisher for NoReplicas {
    fn publish(&mut self, _identity: &str, _message: &Message) {}
}

fn run_until_round_end(room: &mut HostRoom<NoReplicas>) -> u32 {
    let mut ticks = 0u32;
    while room.state().phase != Phase::RoundEnd {
        room.tick();
        ticks += 1;

        // 每一步都守恒：牌墙 + 手牌 + 明牌 + 弃牌 == 108
        assert_eq!(room.state().total_tiles(), Tile::TOTAL_COUNT);
        // 分数零和
        assert_eq!(
            room.state().seats.iter().map(|s| s.score).sum::<i32>(),
            STARTING_SCORE * 4
        );

        assert!(ticks < 10_000, "round did not terminate");
    }
    ticks
}

#[test]
fn test_bots_play_a_full_round() {
    let mut room = HostRoom::new(2024, 0, NoReplicas);
    room.start_game();
    assert_eq!(room.state().phase, Phase::Exchange);
    assert_eq!(room.state().round, 1);

    run_until_round_end(&mut room);

    let state = room.state();
    assert!(state.end_reason.is_some());
    // 流局时每个未离场座位都做过查叫
    assert_eq!(state.total_tiles(), Tile::TOTAL_COUNT);
    // 结算流水也零和
    assert_eq!(state.results.iter().map(|e| e.points).sum::<i32>(), 0);
}

#[test]
fn test_advance_round_through_host() {
    let mut room = HostRoom::new(7, 0, NoReplicas);
    room.start_game();
    run_until_round_end(&mut room);

    let first_winner = room.state().first_winner;
    let dealer_before = room.state().dealer;

    // 机器人不会推进下一局，由在座身份显式发起
    room.handle_message(
        "bot-0",
        Message::Action {
            action: Action::AdvanceRound,
        },
    );

    let state = room.state();
    assert_eq!(state.round, 2);
    assert_eq!(state.phase, Phase::Exchange);
    match first_winner {
        Some(winner) => assert_eq!(state.dealer, winner),
        None => assert_eq!(state.dealer, dealer_before),
    }
    // 新一局重新发牌，分数带着走
    for seat in &state.seats {
        assert_eq!(seat.hand.total_count(), 13);
        assert!(seat.forbidden_suit.is_none());
        assert!(!seat.is_out);
    }
    assert_eq!(
        state.seats.iter().map(|s| s.score).sum::<i32>(),
        STARTING_SCORE * 4
    );
}

#[test]
fn test_round_end_is_stable_without_advance() {
    let mut room = HostRoom::new(31, 0, NoReplicas);
    room.start_game();
    run_until_round_end(&mut room);

    // 没人推进时结算画面保持不动
    let snapshot = room.state().clone();
    for _ in 0..20 {
        room.tick();
    }
    assert_eq!(*room.state(), snapshot);
}

#[test]
fn test_different_seeds_differ() {
    let mut a = HostRoom::new(1, 0, NoReplicas);
    let mut b = HostRoom::new(2, 0, NoReplicas);
    a.start_game();
    b.start_game();
    assert_ne!(a.state().seats[0].hand, b.state().seats[0].hand);
}
