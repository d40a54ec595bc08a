/// 麻将牌类型
///
/// 四川麻将使用 108 张牌：条、筒、万各 36 张（1-9 各 4 张），没有字牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    /// 条子（1-9，共 36 张）
    Bamboo(u8),
    /// 筒子（1-9，共 36 张）
    Dot(u8),
    /// 万子（1-9，共 36 张）
    Character(u8),
}

impl Tile {
    /// 总牌数：108 张
    pub const TOTAL_COUNT: usize = 108;

    /// 牌的种类数：3 花色 × 9 点数
    pub const KIND_COUNT: usize = 27;

    /// 每种花色的数字范围：1-9
    pub const MIN_VALUE: u8 = 1;
    pub const MAX_VALUE: u8 = 9;

    /// 创建一张牌，验证点数有效性
    pub fn new(suit: Suit, value: u8) -> Option<Self> {
        if !(Self::MIN_VALUE..=Self::MAX_VALUE).contains(&value) {
            return None;
        }
        Some(match suit {
            Suit::Bamboo => Tile::Bamboo(value),
            Suit::Dot => Tile::Dot(value),
            Suit::Character => Tile::Character(value),
        })
    }

    /// 获取花色
    pub fn suit(&self) -> Suit {
        match self {
            Tile::Bamboo(_) => Suit::Bamboo,
            Tile::Dot(_) => Suit::Dot,
            Tile::Character(_) => Suit::Character,
        }
    }

    /// 获取点数（1-9）
    pub fn value(&self) -> u8 {
        match self {
            Tile::Bamboo(v) | Tile::Dot(v) | Tile::Character(v) => *v,
        }
    }

    /// 转换为种类索引（0-26）
    ///
    /// 映射规则：suit_index * 9 + (value - 1)
    /// - 条子：0-8
    /// - 筒子：9-17
    /// - 万子：18-26
    pub fn kind_index(&self) -> usize {
        self.suit() as usize * 9 + (self.value() - 1) as usize
    }

    /// 从种类索引创建牌（索引范围 0-26）
    pub fn from_kind_index(index: usize) -> Option<Self> {
        if index >= Self::KIND_COUNT {
            return None;
        }
        let value = (index % 9) as u8 + 1;
        match index / 9 {
            0 => Some(Tile::Bamboo(value)),
            1 => Some(Tile::Dot(value)),
            _ => Some(Tile::Character(value)),
        }
    }

    /// 遍历所有 27 种牌
    pub fn all_kinds() -> impl Iterator<Item = Tile> {
        (0..Self::KIND_COUNT).filter_map(Tile::from_kind_index)
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value(), self.suit().display_name())
    }
}

/// 花色枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Bamboo = 0,
    Dot = 1,
    Character = 2,
}

impl Suit {
    /// 所有花色
    pub fn all() -> [Suit; 3] {
        [Suit::Bamboo, Suit::Dot, Suit::Character]
    }

    /// 花色的中文名
    pub fn display_name(&self) -> &'static str {
        match self {
            Suit::Bamboo => "条",
            Suit::Dot => "筒",
            Suit::Character => "万",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_creation() {
        let tile = Tile::new(Suit::Bamboo, 1).unwrap();
        assert_eq!(tile.suit(), Suit::Bamboo);
        assert_eq!(tile.value(), 1);

        let tile = Tile::new(Suit::Dot, 9).unwrap();
        assert_eq!(tile.suit(), Suit::Dot);
        assert_eq!(tile.value(), 9);

        // 无效的点数
        assert!(Tile::new(Suit::Bamboo, 0).is_none());
        assert!(Tile::new(Suit::Bamboo, 10).is_none());
    }

    #[test]
    fn test_kind_index_roundtrip() {
        for tile in Tile::all_kinds() {
            let restored = Tile::from_kind_index(tile.kind_index()).unwrap();
            assert_eq!(tile, restored);
        }
        assert_eq!(Tile::all_kinds().count(), Tile::KIND_COUNT);
        assert!(Tile::from_kind_index(27).is_none());
    }

    #[test]
    fn test_tile_ordering() {
        // 排序规则：先按花色（条、筒、万），再按点数
        let mut tiles = vec![Tile::Character(1), Tile::Bamboo(9), Tile::Dot(5), Tile::Bamboo(2)];
        tiles.sort();
        assert_eq!(
            tiles,
            vec![Tile::Bamboo(2), Tile::Bamboo(9), Tile::Dot(5), Tile::Character(1)]
        );
    }

    #[test]
    fn test_tile_serde() {
        let tile = Tile::Dot(7);
        let json = serde_json::to_string(&tile).unwrap();
        assert_eq!(json, r#"{"dot":7}"#);
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tile);
    }
}
