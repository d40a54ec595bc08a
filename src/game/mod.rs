//! 游戏规则层：座位与牌组、胡牌判定、换三张、响应裁决、分数结算，
//! 以及把这一切串起来的规则引擎

pub mod action;
pub mod claims;
pub mod engine;
pub mod exchange;
pub mod ledger;
pub mod player;
pub mod state;
pub mod win_eval;

pub use action::Action;
pub use claims::{ClaimResolver, Reaction, Resolution, REACTION_WINDOW_TICKS};
pub use engine::{Applied, EngineError, GameEngine, SEAT_COUNT};
pub use exchange::{ExchangeDirection, ExchangeHandler};
pub use ledger::{LedgerEntry, LedgerKind, ScoreLedger, TING_PENALTY};
pub use player::{Meld, MeldKind, MeldSource, Seat, STARTING_SCORE};
pub use state::{EndReason, GameState, PendingDiscard, Phase};
pub use win_eval::{evaluate_ting, evaluate_win, points_for_win, WinCategory, WinEval};
