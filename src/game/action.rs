use crate::tile::{Suit, Tile};

/// 参与者意图
///
/// 与线上 `action` 消息一一对应；所有前置条件在引擎内重新校验，
/// 不满足时静默忽略
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// 出牌
    Discard { tile: Tile },
    /// 碰（响应窗口内，牌由待决弃牌决定）
    Pong,
    /// 杠：窗口内为直杠（tile 忽略），自己回合为暗杠/补杠（tile 指定，
    /// 省略时自动查找）
    Kong {
        #[serde(default)]
        tile: Option<Tile>,
    },
    /// 胡（自己回合为自摸，窗口内为点炮胡）
    Hu,
    /// 过（放弃响应）
    Pass,
    /// 换三张提交
    Exchange { tiles: [Tile; 3] },
    /// 定缺
    Dingque { suit: Suit },
    /// 进入下一局（roundEnd 阶段任意参与者可发起）
    AdvanceRound,
}
