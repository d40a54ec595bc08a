use crate::game::player::Seat;
use crate::game::state::GameState;
use crate::game::win_eval;
use crate::tile::Tile;

/// 响应窗口时长（时间单位，由宿主负责换算成真实时钟）
pub const REACTION_WINDOW_TICKS: u64 = 8;

/// 窗口内座位的表态
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Hu,
    Kong,
    Pong,
    Pass,
}

/// 窗口裁决结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 点炮胡
    Hu { seat: u8 },
    /// 直杠
    Kong { seat: u8 },
    /// 碰
    Pong { seat: u8 },
    /// 无人响应，轮转到出牌者的下一个未离场座位
    PassThrough,
}

/// 弃牌响应裁决器
///
/// 一张弃牌同时只能被一家响应。按出牌者之后的行牌顺序扫描其余三家，
/// 优先级：胡 > 杠 > 碰；同一优先级内行牌顺序靠前者先得
pub struct ClaimResolver;

impl ClaimResolver {
    /// 该座位能否胡这张弃牌
    pub fn can_hu(seat: &Seat, tile: Tile) -> bool {
        let mut candidate = seat.hand.clone();
        if !candidate.add_tile(tile) {
            return false;
        }
        win_eval::evaluate_win(&candidate, &seat.melds, seat.forbidden_suit).can_win
    }

    /// 该座位能否直杠（手牌中恰有三张相同牌）
    pub fn can_kong(seat: &Seat, tile: Tile) -> bool {
        seat.hand.tile_count(tile) == 3
    }

    /// 该座位能否碰（手牌中至少两张相同牌）
    pub fn can_pong(seat: &Seat, tile: Tile) -> bool {
        seat.hand.tile_count(tile) >= 2
    }

    /// 某种表态对该座位是否合法
    pub fn reaction_is_legal(seat: &Seat, tile: Tile, reaction: Reaction) -> bool {
        match reaction {
            Reaction::Hu => Self::can_hu(seat, tile),
            Reaction::Kong => Self::can_kong(seat, tile),
            Reaction::Pong => Self::can_pong(seat, tile),
            Reaction::Pass => true,
        }
    }

    /// 尝试裁决当前窗口
    ///
    /// 显式表态每到一个就调用一次；窗口超时再以 `at_expiry = true`
    /// 调用一次，此时未表态视为过。
    ///
    /// # 返回
    ///
    /// - `Some(resolution)`：已有定论
    /// - `None`：仍需等待更高优先级座位表态（仅在 `at_expiry = false` 时）
    pub fn resolve(state: &GameState, at_expiry: bool) -> Option<Resolution> {
        let pending = state.pending_discard?;
        let tile = pending.tile;

        // 出牌者之后的行牌顺序
        let order: Vec<u8> = (1..4u8)
            .map(|offset| (pending.seat + offset) % 4)
            .filter(|&id| !state.seat(id).is_out)
            .collect();

        for wanted in [Reaction::Hu, Reaction::Kong, Reaction::Pong] {
            for &id in &order {
                let seat = state.seat(id);
                if !Self::reaction_is_legal(seat, tile, wanted) {
                    continue;
                }
                match state.reactions[id as usize] {
                    Some(r) if r == wanted => {
                        return Some(match wanted {
                            Reaction::Hu => Resolution::Hu { seat: id },
                            Reaction::Kong => Resolution::Kong { seat: id },
                            Reaction::Pong => Resolution::Pong { seat: id },
                            Reaction::Pass => unreachable!(),
                        });
                    }
                    // 已表态但不是这一档：视为放弃该档，继续扫描
                    Some(_) => {}
                    // 尚未表态：窗口期内不能越过它裁决更低优先级
                    None => {
                        if !at_expiry {
                            return None;
                        }
                    }
                }
            }
        }

        // 所有可响应座位都已表态（或窗口已到期）且无人认领
        if at_expiry || order.iter().all(|&id| state.reactions[id as usize].is_some()) {
            Some(Resolution::PassThrough)
        } else {
            None
        }
    }
}
