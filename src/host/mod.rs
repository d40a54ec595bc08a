//! 主机层：线上消息、房间编排与机器人决策

pub mod bot;
pub mod message;
pub mod room;

pub use message::Message;
pub use room::{HostRoom, Publisher};
