use super::tile::{Suit, Tile};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// 牌墙（Wall）
///
/// 存储剩余的牌，支持两端取牌：正常摸牌从牌头，杠后补牌从牌尾。
/// 两端分开消耗，杠补与正常摸牌互不干扰。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Wall {
    tiles: VecDeque<Tile>,
}

impl Wall {
    /// 创建一副完整并洗好的牌墙（108 张）
    ///
    /// 洗牌使用调用方提供的 RNG，相同种子产生相同的牌序
    pub fn shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut tiles = Vec::with_capacity(Tile::TOTAL_COUNT);
        for suit in Suit::all() {
            for value in Tile::MIN_VALUE..=Tile::MAX_VALUE {
                for _ in 0..4 {
                    // 同种牌 4 张
                    if let Some(tile) = Tile::new(suit, value) {
                        tiles.push(tile);
                    }
                }
            }
        }
        tiles.shuffle(rng);
        Self {
            tiles: tiles.into(),
        }
    }

    /// 创建空牌墙（仅用于测试中构造特定局面）
    pub fn empty() -> Self {
        Self {
            tiles: VecDeque::new(),
        }
    }

    /// 从牌头摸一张牌（正常摸牌）
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop_back()
    }

    /// 从牌尾摸一张牌（杠后补牌）
    pub fn draw_from_tail(&mut self) -> Option<Tile> {
        self.tiles.pop_front()
    }

    /// 查询剩余牌数
    pub fn remaining_count(&self) -> usize {
        self.tiles.len()
    }

    /// 检查牌墙是否为空
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
