//! 四川麻将主机端规则引擎
//!
//! 血战到底规则：缺一门、换三张、没有顺子（刻子胡牌）、
//! 胡牌后离场继续打。引擎是纯状态机，持有唯一权威的对局快照，
//! 所有意图经主机的串行队列进入，任何不满足前置条件的意图
//! 静默忽略；每次变更后把完整快照广播给所有副本。
//!
//! 分层：
//!
//! - [`tile`]：牌、手牌、牌墙
//! - [`game`]：胡牌判定、换三张、响应裁决、结算与规则引擎
//! - [`host`]：线上消息、房间编排、机器人

pub mod game;
pub mod host;
pub mod tile;

pub use game::{
    Action, Applied, EndReason, GameEngine, GameState, LedgerEntry, Phase, Seat,
};
pub use host::{HostRoom, Message, Publisher};
pub use tile::{Hand, Suit, Tile, Wall};
