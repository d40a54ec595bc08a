//! 牌相关类型：牌、手牌、牌墙

pub mod hand;
pub mod tile;
pub mod wall;

pub use hand::Hand;
pub use tile::{Suit, Tile};
pub use wall::Wall;
