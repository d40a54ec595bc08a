use super::tile::{Suit, Tile};
use smallvec::SmallVec;
use std::collections::HashMap;

/// 手牌（Hand）
///
/// 使用 HashMap 存储每种牌的数量，支持 O(1) 的添加、移除和查询操作。
/// 快照序列化时转换为排序后的牌向量，方便各副本直接展示。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(into = "Vec<Tile>", from = "Vec<Tile>")]
pub struct Hand {
    /// 牌的数量映射：Tile -> 数量（1-4）
    tiles: HashMap<Tile, u8>,
    /// 总牌数（用于快速查询）
    total_count: usize,
}

impl Hand {
    /// 创建空手牌
    pub fn new() -> Self {
        Self {
            tiles: HashMap::new(),
            total_count: 0,
        }
    }

    /// 添加一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功添加
    /// - `false`：该牌已有 4 张
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        let count = self.tiles.entry(tile).or_insert(0);
        if *count >= 4 {
            return false;
        }
        *count += 1;
        self.total_count += 1;
        true
    }

    /// 移除一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功移除
    /// - `false`：手牌中没有该牌
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        match self.tiles.get_mut(&tile) {
            Some(count) if *count > 0 => {
                *count -= 1;
                self.total_count -= 1;
                if *count == 0 {
                    self.tiles.remove(&tile);
                }
                true
            }
            _ => false,
        }
    }

    /// 检查是否有某张牌
    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tile_count(tile) > 0
    }

    /// 查询某种牌的数量
    pub fn tile_count(&self, tile: Tile) -> u8 {
        self.tiles.get(&tile).copied().unwrap_or(0)
    }

    /// 获取总牌数
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// 检查手牌是否为空
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// 清空手牌
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.total_count = 0;
    }

    /// 检查手牌中是否还有某花色的牌
    pub fn has_suit(&self, suit: Suit) -> bool {
        self.tiles.keys().any(|t| t.suit() == suit)
    }

    /// 取出某花色中的任意一张牌（用于机器人优先打缺门）
    pub fn first_of_suit(&self, suit: Suit) -> Option<Tile> {
        self.to_sorted_vec().into_iter().find(|t| t.suit() == suit)
    }

    /// 统计某花色的张数
    pub fn suit_count(&self, suit: Suit) -> usize {
        self.tiles
            .iter()
            .filter(|(t, _)| t.suit() == suit)
            .map(|(_, &c)| c as usize)
            .sum()
    }

    /// 转换为排序后的牌向量
    ///
    /// 排序规则：先按花色（条、筒、万），再按点数（1-9）
    pub fn to_sorted_vec(&self) -> Vec<Tile> {
        let mut result = Vec::with_capacity(self.total_count);
        for (tile, &count) in &self.tiles {
            for _ in 0..count {
                result.push(*tile);
            }
        }
        result.sort();
        result
    }

    /// 获取所有不同的牌种类
    pub fn distinct_tiles(&self) -> SmallVec<[Tile; 10]> {
        self.tiles.keys().copied().collect()
    }

    /// 获取所有牌的数量映射
    pub fn tiles_map(&self) -> &HashMap<Tile, u8> {
        &self.tiles
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Tile>> for Hand {
    fn from(tiles: Vec<Tile>) -> Self {
        let mut hand = Hand::new();
        for tile in tiles {
            hand.add_tile(tile);
        }
        hand
    }
}

impl From<Hand> for Vec<Tile> {
    fn from(hand: Hand) -> Self {
        hand.to_sorted_vec()
    }
}
