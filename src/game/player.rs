use crate::tile::{Hand, Suit, Tile};

/// 起始分数
pub const STARTING_SCORE: i32 = 200;

/// 明牌组的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeldSource {
    /// 自己凑齐（暗杠、补杠）
    SelfFormed,
    /// 抢别人打出的牌形成
    Claimed { from_seat: u8 },
}

/// 明牌组的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeldKind {
    /// 碰（三张相同牌）
    Triplet,
    /// 杠（四张相同牌）
    Quad,
}

/// 碰/杠牌组
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Meld {
    pub tile: Tile,
    pub kind: MeldKind,
    pub source: MeldSource,
}

impl Meld {
    /// 该牌组占用的牌数
    pub fn tile_count(&self) -> usize {
        match self.kind {
            MeldKind::Triplet => 3,
            MeldKind::Quad => 4,
        }
    }
}

/// 座位（玩家）状态
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Seat {
    /// 座位号（0-3）
    pub id: u8,
    /// 参与者身份标识（网络连接 ID 或机器人 ID）
    pub identity: String,
    /// 显示名称
    pub name: String,
    /// 是否机器人
    pub is_bot: bool,
    /// 手牌
    pub hand: Hand,
    /// 已碰/杠的牌组
    pub melds: Vec<Meld>,
    /// 弃牌（按打出顺序）
    pub discards: Vec<Tile>,
    /// 累计分数（起始 200）
    pub score: i32,
    /// 定缺的花色（None 表示未定缺）
    pub forbidden_suit: Option<Suit>,
    /// 换三张提交的牌（缓存，四家齐后统一交换）
    pub exchange_tiles: Option<[Tile; 3]>,
    /// 阶段就绪标志（换牌/定缺已提交）
    pub ready: bool,
    /// 是否已离场（本局胡牌）
    pub is_out: bool,
    /// 是否听牌（局末结算时更新）
    pub is_ting: bool,
}

impl Seat {
    /// 创建新座位
    pub fn new(id: u8, identity: impl Into<String>, name: impl Into<String>, is_bot: bool) -> Self {
        Self {
            id,
            identity: identity.into(),
            name: name.into(),
            is_bot,
            hand: Hand::new(),
            melds: Vec::new(),
            discards: Vec::new(),
            score: STARTING_SCORE,
            forbidden_suit: None,
            exchange_tiles: None,
            ready: false,
            is_out: false,
            is_ting: false,
        }
    }

    /// 重置到新一局（保留分数与身份）
    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.melds.clear();
        self.discards.clear();
        self.forbidden_suit = None;
        self.exchange_tiles = None;
        self.ready = false;
        self.is_out = false;
        self.is_ting = false;
    }

    /// 检查手牌中是否还有定缺门的牌
    ///
    /// 有缺门牌的座位不能胡牌，且必须先打缺门牌
    pub fn has_forbidden_tiles(&self) -> bool {
        match self.forbidden_suit {
            Some(suit) => self.hand.has_suit(suit),
            None => false,
        }
    }

    /// 查找可补杠的碰牌组（手牌中有第四张）
    pub fn promotable_triplet(&self, tile: Tile) -> Option<usize> {
        if !self.hand.has_tile(tile) {
            return None;
        }
        self.melds
            .iter()
            .position(|m| m.kind == MeldKind::Triplet && m.tile == tile)
    }

    /// 标记离场（胡牌）
    pub fn mark_out(&mut self) {
        self.is_out = true;
    }
}
