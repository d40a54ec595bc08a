use crate::game::claims::Reaction;
use crate::game::exchange::ExchangeDirection;
use crate::game::ledger::LedgerEntry;
use crate::game::player::Seat;
use crate::tile::{Tile, Wall};

/// 游戏阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// 组局中，等待参与者加入
    Lobby,
    /// 换三张
    Exchange,
    /// 定缺
    Dingque,
    /// 对局进行中
    Playing,
    /// 本局结束，展示结算，等待 advance_round
    RoundEnd,
    /// 整场结束（终态）
    Ended,
}

/// 本局结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// 牌墙摸完
    DeckEmpty,
    /// 只剩一家未离场
    OneLeft,
}

/// 待决弃牌（响应窗口的客体）
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PendingDiscard {
    pub tile: Tile,
    pub seat: u8,
}

/// 游戏状态（整局快照）
///
/// 由主机独占持有并修改；每次变更后整体序列化广播给所有副本。
/// `step` 是单调递增的步号：局面每推进一步（发牌、出牌、裁决、
/// 结算）都会使它前进，引用过期步号的延时任务（响应窗口超时）
/// 一律静默作废
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GameState {
    /// 当前阶段
    pub phase: Phase,
    /// 座位（开局后固定 4 个）
    pub seats: Vec<Seat>,
    /// 牌墙
    pub wall: Wall,
    /// 当前回合座位
    pub current_turn: u8,
    /// 庄家座位
    pub dealer: u8,
    /// 局数（从 1 开始）
    pub round: u32,
    /// 待决弃牌（响应窗口打开时有值）
    pub pending_discard: Option<PendingDiscard>,
    /// 响应窗口是否打开
    pub window_open: bool,
    /// 窗口内各座位的已表态响应
    pub reactions: [Option<Reaction>; 4],
    /// 单调步号
    pub step: u64,
    /// 本局胡牌座位（按胡牌顺序）
    pub winners: Vec<u8>,
    /// 本局结算流水
    pub results: Vec<LedgerEntry>,
    /// 本局换牌方向
    pub exchange_direction: Option<ExchangeDirection>,
    /// 本局第一个胡牌的座位（下局庄家）
    pub first_winner: Option<u8>,
    /// 本局结束原因
    pub end_reason: Option<EndReason>,
}

impl GameState {
    /// 创建组局中的初始状态
    pub fn new() -> Self {
        Self {
            phase: Phase::Lobby,
            seats: Vec::new(),
            wall: Wall::empty(),
            current_turn: 0,
            dealer: 0,
            round: 0,
            pending_discard: None,
            window_open: false,
            reactions: [None; 4],
            step: 0,
            winners: Vec::new(),
            results: Vec::new(),
            exchange_direction: None,
            first_winner: None,
            end_reason: None,
        }
    }

    /// 按身份标识查找座位号
    pub fn seat_index(&self, identity: &str) -> Option<u8> {
        self.seats
            .iter()
            .position(|s| s.identity == identity)
            .map(|i| i as u8)
    }

    /// 获取座位（不可变引用）
    pub fn seat(&self, id: u8) -> &Seat {
        &self.seats[id as usize]
    }

    /// 获取座位（可变引用）
    pub fn seat_mut(&mut self, id: u8) -> &mut Seat {
        &mut self.seats[id as usize]
    }

    /// 未离场座位数
    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_out).count()
    }

    /// 从某座位之后找下一个未离场的座位
    pub fn next_active_after(&self, seat: u8) -> Option<u8> {
        for offset in 1..=4u8 {
            let next = (seat + offset) % 4;
            if !self.seats[next as usize].is_out {
                return Some(next);
            }
        }
        None
    }

    /// 推进步号，作废所有引用旧步号的延时任务
    pub fn bump_step(&mut self) {
        self.step += 1;
    }

    /// 全场牌数守恒检查：牌墙 + 手牌 + 明牌 + 弃牌 == 108
    ///
    /// 任意合法动作序列执行后都必须成立
    pub fn total_tiles(&self) -> usize {
        let in_seats: usize = self
            .seats
            .iter()
            .map(|s| {
                s.hand.total_count()
                    + s.melds.iter().map(|m| m.tile_count()).sum::<usize>()
                    + s.discards.len()
            })
            .sum();
        self.wall.remaining_count() + in_seats
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_seat_state() -> GameState {
        let mut state = GameState::new();
        for i in 0..4u8 {
            state
                .seats
                .push(Seat::new(i, format!("bot-{i}"), format!("电脑 {}", i + 1), true));
        }
        state
    }

    #[test]
    fn test_next_active_after_skips_out_seats() {
        let mut state = four_seat_state();
        state.seats[1].is_out = true;
        state.seats[2].is_out = true;

        assert_eq!(state.next_active_after(0), Some(3));
        assert_eq!(state.next_active_after(3), Some(0));
        assert_eq!(state.active_count(), 2);
    }

    #[test]
    fn test_next_active_after_all_out() {
        let mut state = four_seat_state();
        for seat in &mut state.seats {
            seat.is_out = true;
        }
        assert_eq!(state.next_active_after(0), None);
    }

    #[test]
    fn test_seat_index_lookup() {
        let state = four_seat_state();
        assert_eq!(state.seat_index("bot-2"), Some(2));
        assert_eq!(state.seat_index("unknown"), None);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = four_seat_state();
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
