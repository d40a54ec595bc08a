use crate::game::action::Action;
use crate::game::claims::{ClaimResolver, Reaction, Resolution};
use crate::game::exchange::{ExchangeDirection, ExchangeHandler};
use crate::game::ledger::ScoreLedger;
use crate::game::player::{Meld, MeldKind, MeldSource, Seat};
use crate::game::state::{EndReason, GameState, PendingDiscard, Phase};
use crate::game::win_eval;
use crate::tile::{Tile, Wall};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use tracing::{debug, info};

/// 满桌人数
pub const SEAT_COUNT: usize = 4;

/// 起手牌数（庄家进入行牌阶段时再摸第 14 张）
pub const INITIAL_HAND_SIZE: usize = 13;

/// 加入对局失败的原因
///
/// 加入是唯一会显式报错的入口，开局后所有玩法意图都走
/// 静默忽略路径
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// 四个座位已坐满
    RoomFull,
    /// 对局已经开始
    GameStarted,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::RoomFull => write!(f, "房间已满"),
            EngineError::GameStarted => write!(f, "对局已开始"),
        }
    }
}

impl std::error::Error for EngineError {}

/// 意图处理结果
///
/// `Mutated` 表示状态发生了变化，需要广播新快照；
/// `Ignored` 表示前置条件不满足，意图被静默丢弃
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Mutated,
    Ignored,
}

/// 规则引擎
///
/// 持有唯一权威的 [`GameState`]，所有变更都经由 `submit_action` 与
/// `window_timeout` 两个入口串行进入。随机性来自种子化的 ChaCha8：
/// 同一种子、同一意图序列必然得到同一局面
pub struct GameEngine {
    pub state: GameState,
    rng: ChaCha8Rng,
}

impl GameEngine {
    /// 以给定种子创建空桌引擎
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// 加入座位
    ///
    /// # 返回
    ///
    /// 分到的座位号；桌满或已开局时返回错误
    pub fn add_seat(
        &mut self,
        identity: impl Into<String>,
        name: impl Into<String>,
        is_bot: bool,
    ) -> Result<u8, EngineError> {
        if self.state.phase != Phase::Lobby {
            return Err(EngineError::GameStarted);
        }
        if self.state.seats.len() >= SEAT_COUNT {
            return Err(EngineError::RoomFull);
        }

        let id = self.state.seats.len() as u8;
        self.state.seats.push(Seat::new(id, identity, name, is_bot));
        self.state.bump_step();
        Ok(id)
    }

    /// 开局：从组局阶段进入第一局的换三张
    ///
    /// 人数不足四人时忽略
    pub fn start_game(&mut self) -> Applied {
        if self.state.phase != Phase::Lobby || self.state.seats.len() != SEAT_COUNT {
            return Applied::Ignored;
        }
        self.seed_round();
        Applied::Mutated
    }

    /// 开一局新牌：洗牌、发牌、定换牌方向
    fn seed_round(&mut self) {
        self.state.round += 1;
        if let Some(winner) = self.state.first_winner {
            self.state.dealer = winner;
        }

        for seat in &mut self.state.seats {
            seat.reset_for_round();
        }
        self.state.winners.clear();
        self.state.results.clear();
        self.state.first_winner = None;
        self.state.end_reason = None;
        self.state.pending_discard = None;
        self.state.window_open = false;
        self.state.reactions = [None; 4];

        self.state.wall = Wall::shuffled(&mut self.rng);
        for _ in 0..INITIAL_HAND_SIZE {
            for id in 0..SEAT_COUNT {
                if let Some(tile) = self.state.wall.draw() {
                    self.state.seats[id].hand.add_tile(tile);
                }
            }
        }

        self.state.exchange_direction = Some(ExchangeDirection::random(&mut self.rng));
        self.state.phase = Phase::Exchange;
        self.state.current_turn = self.state.dealer;
        self.state.bump_step();

        info!(
            round = self.state.round,
            dealer = self.state.dealer,
            "round seeded"
        );
    }

    /// 处理一条参与者意图
    ///
    /// 所有前置条件在这里重新校验：身份不在座、阶段不符、
    /// 不该它行动、牌不在手，任何一条不满足都静默忽略
    pub fn submit_action(&mut self, identity: &str, action: &Action) -> Applied {
        let seat_id = match self.state.seat_index(identity) {
            Some(id) => id,
            None => {
                debug!(identity, "intent from unknown identity ignored");
                return Applied::Ignored;
            }
        };

        let applied = match (self.state.phase, action) {
            (Phase::Exchange, Action::Exchange { tiles }) => self.handle_exchange(seat_id, *tiles),
            (Phase::Dingque, Action::Dingque { suit }) => self.handle_dingque(seat_id, *suit),
            (Phase::Playing, _) => self.handle_playing(seat_id, action),
            (Phase::RoundEnd, Action::AdvanceRound) => {
                self.seed_round();
                Applied::Mutated
            }
            _ => Applied::Ignored,
        };

        if applied == Applied::Ignored {
            debug!(seat = seat_id, ?action, phase = ?self.state.phase, "intent ignored");
        }
        applied
    }

    /// 响应窗口超时
    ///
    /// `step` 是窗口打开时的步号：窗口已被显式表态裁决、或弃牌
    /// 已换成另一张时步号必然前进，过期的超时在这里静默作废
    pub fn window_timeout(&mut self, step: u64) -> Applied {
        if !self.state.window_open || self.state.step != step {
            debug!(step, current = self.state.step, "stale window timeout ignored");
            return Applied::Ignored;
        }
        match ClaimResolver::resolve(&self.state, true) {
            Some(resolution) => {
                self.apply_resolution(resolution);
                Applied::Mutated
            }
            None => Applied::Ignored,
        }
    }

    /// 结束整场（终态，之后所有意图忽略）
    pub fn end_game(&mut self) {
        self.state.phase = Phase::Ended;
        self.state.window_open = false;
        self.state.pending_discard = None;
        self.state.bump_step();
        info!("game ended");
    }

    fn handle_exchange(&mut self, seat_id: u8, tiles: [Tile; 3]) -> Applied {
        // 方向必须在任何提交生效之前就绪
        let direction = match self.state.exchange_direction {
            Some(d) => d,
            None => return Applied::Ignored,
        };
        let seat = self.state.seat(seat_id);
        if seat.ready {
            return Applied::Ignored;
        }
        // 三张牌必须都在手里（含重复张数）
        let mut probe = seat.hand.clone();
        if !tiles.iter().all(|&t| probe.remove_tile(t)) {
            return Applied::Ignored;
        }

        let seat = self.state.seat_mut(seat_id);
        seat.exchange_tiles = Some(tiles);
        seat.ready = true;

        if self.state.seats.iter().all(|s| s.ready)
            && ExchangeHandler::apply(&mut self.state.seats, direction)
        {
            self.state.phase = Phase::Dingque;
            info!(?direction, "exchange applied, entering dingque");
        }
        self.state.bump_step();
        Applied::Mutated
    }

    fn handle_dingque(&mut self, seat_id: u8, suit: crate::tile::Suit) -> Applied {
        let seat = self.state.seat_mut(seat_id);
        if seat.forbidden_suit.is_some() {
            return Applied::Ignored;
        }
        seat.forbidden_suit = Some(suit);
        seat.ready = true;

        if self.state.seats.iter().all(|s| s.forbidden_suit.is_some()) {
            for seat in &mut self.state.seats {
                seat.ready = false;
            }
            self.state.phase = Phase::Playing;
            info!("dingque complete, entering play");
            // 庄家先手，摸第 14 张
            self.give_turn_with_draw(self.state.dealer);
        }
        self.state.bump_step();
        Applied::Mutated
    }

    fn handle_playing(&mut self, seat_id: u8, action: &Action) -> Applied {
        if self.state.window_open {
            let reaction = match action {
                Action::Hu => Reaction::Hu,
                Action::Kong { .. } => Reaction::Kong,
                Action::Pong => Reaction::Pong,
                Action::Pass => Reaction::Pass,
                _ => return Applied::Ignored,
            };
            return self.handle_reaction(seat_id, reaction);
        }

        if seat_id != self.state.current_turn || self.state.seat(seat_id).is_out {
            return Applied::Ignored;
        }
        match action {
            Action::Discard { tile } => self.handle_discard(seat_id, *tile),
            Action::Hu => self.handle_self_hu(seat_id),
            Action::Kong { tile } => self.handle_self_kong(seat_id, *tile),
            _ => Applied::Ignored,
        }
    }

    /// 记录一条窗口表态；凑齐可裁决条件时立即裁决
    fn handle_reaction(&mut self, seat_id: u8, reaction: Reaction) -> Applied {
        let pending = match self.state.pending_discard {
            Some(p) => p,
            None => return Applied::Ignored,
        };
        if seat_id == pending.seat || self.state.seat(seat_id).is_out {
            return Applied::Ignored;
        }
        // 首次表态生效，重复表态忽略
        if self.state.reactions[seat_id as usize].is_some() {
            return Applied::Ignored;
        }
        if !ClaimResolver::reaction_is_legal(self.state.seat(seat_id), pending.tile, reaction) {
            return Applied::Ignored;
        }

        self.state.reactions[seat_id as usize] = Some(reaction);
        if let Some(resolution) = ClaimResolver::resolve(&self.state, false) {
            self.apply_resolution(resolution);
        }
        Applied::Mutated
    }

    fn handle_discard(&mut self, seat_id: u8, tile: Tile) -> Applied {
        let seat = self.state.seat(seat_id);
        if !seat.hand.has_tile(tile) {
            return Applied::Ignored;
        }
        // 手里还有缺门牌时必须先打缺门牌
        if seat.has_forbidden_tiles() && Some(tile.suit()) != seat.forbidden_suit {
            return Applied::Ignored;
        }

        let seat = self.state.seat_mut(seat_id);
        seat.hand.remove_tile(tile);
        seat.discards.push(tile);

        self.state.pending_discard = Some(PendingDiscard {
            tile,
            seat: seat_id,
        });
        self.state.window_open = true;
        self.state.reactions = [None; 4];
        self.state.bump_step();
        debug!(seat = seat_id, %tile, "discard, reaction window open");
        Applied::Mutated
    }

    fn handle_self_hu(&mut self, seat_id: u8) -> Applied {
        let seat = self.state.seat(seat_id);
        let eval = win_eval::evaluate_win(&seat.hand, &seat.melds, seat.forbidden_suit);
        if !eval.can_win {
            return Applied::Ignored;
        }

        let entries = ScoreLedger::settle_self_draw(&mut self.state.seats, seat_id, eval.fan);
        self.state.results.extend(entries);
        self.finish_win(seat_id, seat_id);
        Applied::Mutated
    }

    /// 自己回合的杠：暗杠（手握四张）或补杠（碰过的刻子加第四张）
    ///
    /// 未指定牌时自动查找，先找暗杠再找补杠
    fn handle_self_kong(&mut self, seat_id: u8, tile: Option<Tile>) -> Applied {
        let seat = self.state.seat(seat_id);
        let target = match tile {
            Some(t) => t,
            None => match Self::find_kong_tile(seat) {
                Some(t) => t,
                None => return Applied::Ignored,
            },
        };

        if seat.hand.tile_count(target) == 4 {
            let seat = self.state.seat_mut(seat_id);
            for _ in 0..4 {
                seat.hand.remove_tile(target);
            }
            seat.melds.push(Meld {
                tile: target,
                kind: MeldKind::Quad,
                source: MeldSource::SelfFormed,
            });
        } else if let Some(idx) = seat.promotable_triplet(target) {
            let seat = self.state.seat_mut(seat_id);
            seat.hand.remove_tile(target);
            seat.melds[idx].kind = MeldKind::Quad;
        } else {
            return Applied::Ignored;
        }

        debug!(seat = seat_id, %target, "kong formed");
        // 杠后从牌墙尾部补一张，回合不变
        self.replacement_draw(seat_id);
        Applied::Mutated
    }

    fn find_kong_tile(seat: &Seat) -> Option<Tile> {
        if let Some(tile) = seat
            .hand
            .distinct_tiles()
            .into_iter()
            .find(|&t| seat.hand.tile_count(t) == 4)
        {
            return Some(tile);
        }
        seat.hand
            .distinct_tiles()
            .into_iter()
            .find(|&t| seat.promotable_triplet(t).is_some())
    }

    /// 执行窗口裁决结果
    fn apply_resolution(&mut self, resolution: Resolution) {
        let pending = match self.state.pending_discard.take() {
            Some(p) => p,
            None => return,
        };
        self.state.window_open = false;
        self.state.reactions = [None; 4];

        match resolution {
            Resolution::Hu { seat } => {
                // 弃牌从牌河移入赢家手牌
                self.state.seat_mut(pending.seat).discards.pop();
                self.state.seat_mut(seat).hand.add_tile(pending.tile);

                let winner = self.state.seat(seat);
                let eval =
                    win_eval::evaluate_win(&winner.hand, &winner.melds, winner.forbidden_suit);
                let entries = ScoreLedger::settle_discard_hu(
                    &mut self.state.seats,
                    seat,
                    pending.seat,
                    eval.fan,
                );
                self.state.results.extend(entries);
                self.finish_win(seat, pending.seat);
            }
            Resolution::Kong { seat } => {
                self.state.seat_mut(pending.seat).discards.pop();
                let claimant = self.state.seat_mut(seat);
                for _ in 0..3 {
                    claimant.hand.remove_tile(pending.tile);
                }
                claimant.melds.push(Meld {
                    tile: pending.tile,
                    kind: MeldKind::Quad,
                    source: MeldSource::Claimed {
                        from_seat: pending.seat,
                    },
                });
                self.state.current_turn = seat;
                debug!(seat, tile = %pending.tile, "discard claimed for kong");
                self.replacement_draw(seat);
            }
            Resolution::Pong { seat } => {
                self.state.seat_mut(pending.seat).discards.pop();
                let claimant = self.state.seat_mut(seat);
                for _ in 0..2 {
                    claimant.hand.remove_tile(pending.tile);
                }
                claimant.melds.push(Meld {
                    tile: pending.tile,
                    kind: MeldKind::Triplet,
                    source: MeldSource::Claimed {
                        from_seat: pending.seat,
                    },
                });
                // 碰家直接出牌，不摸牌
                self.state.current_turn = seat;
                self.state.bump_step();
                debug!(seat, tile = %pending.tile, "discard claimed for pong");
            }
            Resolution::PassThrough => {
                if let Some(next) = self.state.next_active_after(pending.seat) {
                    self.give_turn_with_draw(next);
                } else {
                    self.end_round(EndReason::OneLeft);
                }
            }
        }
    }

    /// 胡牌后的公共收尾：记录赢家、判断血战是否继续
    fn finish_win(&mut self, winner: u8, turn_anchor: u8) {
        self.state.winners.push(winner);
        if self.state.first_winner.is_none() {
            self.state.first_winner = Some(winner);
        }
        self.state.seat_mut(winner).mark_out();
        info!(winner, "seat won and left the round");

        if self.state.active_count() <= 1 {
            self.end_round(EndReason::OneLeft);
            return;
        }
        match self.state.next_active_after(turn_anchor) {
            Some(next) => self.give_turn_with_draw(next),
            None => self.end_round(EndReason::OneLeft),
        }
    }

    /// 把回合交给某座位并从牌墙头部摸一张
    fn give_turn_with_draw(&mut self, seat_id: u8) {
        match self.state.wall.draw() {
            Some(tile) => {
                self.state.seat_mut(seat_id).hand.add_tile(tile);
                self.state.current_turn = seat_id;
                self.state.bump_step();
            }
            None => self.end_round(EndReason::DeckEmpty),
        }
    }

    /// 杠后从牌墙尾部补一张
    fn replacement_draw(&mut self, seat_id: u8) {
        match self.state.wall.draw_from_tail() {
            Some(tile) => {
                self.state.seat_mut(seat_id).hand.add_tile(tile);
                self.state.current_turn = seat_id;
                self.state.bump_step();
            }
            None => self.end_round(EndReason::DeckEmpty),
        }
    }

    /// 结束本局：流局时查叫结算，进入结算展示阶段
    fn end_round(&mut self, reason: EndReason) {
        if reason == EndReason::DeckEmpty {
            let entries = ScoreLedger::settle_deck_empty(&mut self.state.seats);
            self.state.results.extend(entries);
        }
        self.state.end_reason = Some(reason);
        self.state.phase = Phase::RoundEnd;
        self.state.window_open = false;
        self.state.pending_discard = None;
        self.state.bump_step();
        info!(?reason, "round ended");
    }
}
