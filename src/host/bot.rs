//! 机器人决策
//!
//! 纯函数轮询：只读快照，产出意图，经主机的串行队列进引擎。
//! 策略与人类新手相当：先清缺门，再拆孤张，能胡就胡

use crate::game::{evaluate_win, Action, ClaimResolver, GameState, Phase, Seat};
use crate::tile::{Suit, Tile};

/// 换三张选牌：挑手里最弱（张数最少且非缺门候选）的花色凑三张，
/// 不够时从其余牌里补齐
pub fn choose_exchange(seat: &Seat) -> Option<[Tile; 3]> {
    let hand = &seat.hand;
    if hand.total_count() < 3 {
        return None;
    }

    let weak = Suit::all()
        .iter()
        .copied()
        .filter(|&s| hand.suit_count(s) > 0)
        .min_by_key(|&s| hand.suit_count(s));

    let sorted = hand.to_sorted_vec();
    let mut picks: Vec<Tile> = Vec::with_capacity(3);
    if let Some(suit) = weak {
        picks.extend(sorted.iter().copied().filter(|t| t.suit() == suit).take(3));
    }
    for &tile in &sorted {
        if picks.len() == 3 {
            break;
        }
        if Some(tile.suit()) != weak {
            picks.push(tile);
        }
    }

    (picks.len() == 3).then(|| [picks[0], picks[1], picks[2]])
}

/// 定缺选门：张数最少的花色（含零张）
pub fn decide_suit(seat: &Seat) -> Suit {
    let mut best = Suit::Bamboo;
    let mut best_count = usize::MAX;
    for &suit in Suit::all().iter() {
        let count = seat.hand.suit_count(suit);
        if count < best_count {
            best = suit;
            best_count = count;
        }
    }
    best
}

/// 出牌选牌：缺门牌最优先，其次孤张，最后随便打第一张
pub fn decide_discard(seat: &Seat) -> Option<Tile> {
    if let Some(suit) = seat.forbidden_suit {
        if let Some(tile) = seat.hand.first_of_suit(suit) {
            return Some(tile);
        }
    }
    let sorted = seat.hand.to_sorted_vec();
    if let Some(&tile) = sorted.iter().find(|&&t| seat.hand.tile_count(t) == 1) {
        return Some(tile);
    }
    sorted.first().copied()
}

/// 自己回合可杠的牌：暗杠四张或补杠碰牌组，跳过缺门花色
fn self_kong_tile(seat: &Seat) -> Option<Tile> {
    seat.hand.distinct_tiles().into_iter().find(|&t| {
        Some(t.suit()) != seat.forbidden_suit
            && (seat.hand.tile_count(t) == 4 || seat.promotable_triplet(t).is_some())
    })
}

/// 轮询快照，为每个该行动的机器人座位产出一条意图
///
/// 结算展示阶段机器人不推进下一局，留给真人发起
pub fn poll(state: &GameState) -> Vec<(String, Action)> {
    let mut intents = Vec::new();

    match state.phase {
        Phase::Exchange => {
            for seat in state.seats.iter().filter(|s| s.is_bot && !s.ready) {
                if let Some(tiles) = choose_exchange(seat) {
                    intents.push((seat.identity.clone(), Action::Exchange { tiles }));
                }
            }
        }
        Phase::Dingque => {
            for seat in state
                .seats
                .iter()
                .filter(|s| s.is_bot && s.forbidden_suit.is_none())
            {
                intents.push((
                    seat.identity.clone(),
                    Action::Dingque {
                        suit: decide_suit(seat),
                    },
                ));
            }
        }
        Phase::Playing => {
            if state.window_open {
                if let Some(pending) = state.pending_discard {
                    for seat in &state.seats {
                        if !seat.is_bot
                            || seat.is_out
                            || seat.id == pending.seat
                            || state.reactions[seat.id as usize].is_some()
                        {
                            continue;
                        }
                        intents.push((seat.identity.clone(), react_to(seat, pending.tile)));
                    }
                }
            } else {
                let seat = state.seat(state.current_turn);
                if seat.is_bot && !seat.is_out {
                    if let Some(action) = turn_action(seat) {
                        intents.push((seat.identity.clone(), action));
                    }
                }
            }
        }
        _ => {}
    }

    intents
}

/// 窗口内的表态：能胡必胡，缺门牌不碰不杠
fn react_to(seat: &Seat, tile: Tile) -> Action {
    if ClaimResolver::can_hu(seat, tile) {
        return Action::Hu;
    }
    if Some(tile.suit()) != seat.forbidden_suit {
        if ClaimResolver::can_kong(seat, tile) {
            return Action::Kong { tile: None };
        }
        if ClaimResolver::can_pong(seat, tile) {
            return Action::Pong;
        }
    }
    Action::Pass
}

/// 自己回合的决策：自摸 > 杠 > 出牌
fn turn_action(seat: &Seat) -> Option<Action> {
    if evaluate_win(&seat.hand, &seat.melds, seat.forbidden_suit).can_win {
        return Some(Action::Hu);
    }
    if let Some(tile) = self_kong_tile(seat) {
        return Some(Action::Kong { tile: Some(tile) });
    }
    decide_discard(seat).map(|tile| Action::Discard { tile })
}
