use crate::game::player::Seat;
use rand::Rng;

/// 换三张方向
///
/// 每局开始时随机选定，四家提交齐后统一生效
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeDirection {
    /// 收上家提交的牌（牌往下家传）
    Previous,
    /// 收下家提交的牌（牌往上家传）
    Next,
    /// 与对家互换
    Across,
}

impl ExchangeDirection {
    /// 随机选一个方向
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => ExchangeDirection::Previous,
            1 => ExchangeDirection::Next,
            _ => ExchangeDirection::Across,
        }
    }

    /// 座位 `seat` 收到的牌来自哪个座位
    pub fn source_seat(&self, seat: u8) -> u8 {
        match self {
            ExchangeDirection::Previous => (seat + 3) % 4,
            ExchangeDirection::Next => (seat + 1) % 4,
            ExchangeDirection::Across => (seat + 2) % 4,
        }
    }
}

/// 换三张操作器
pub struct ExchangeHandler;

impl ExchangeHandler {
    /// 四家提交齐后一次性执行交换
    ///
    /// 每家先移出自己提交的三张，再收进来源座位提交的三张；
    /// 所有转移同时生效，之后清空提交缓存与就绪标志。
    ///
    /// # 返回
    ///
    /// 任一座位缺少提交或手牌中找不到提交的牌时返回 `false`，状态不变
    pub fn apply(seats: &mut [Seat], direction: ExchangeDirection) -> bool {
        let submissions: Vec<[crate::tile::Tile; 3]> = match seats
            .iter()
            .map(|s| s.exchange_tiles)
            .collect::<Option<Vec<_>>>()
        {
            Some(subs) if subs.len() == 4 => subs,
            _ => return false,
        };

        // 先校验每家确实持有自己提交的牌
        for (seat, tiles) in seats.iter().zip(&submissions) {
            let mut probe = seat.hand.clone();
            if !tiles.iter().all(|&t| probe.remove_tile(t)) {
                return false;
            }
        }

        for i in 0..4usize {
            for &tile in &submissions[i] {
                seats[i].hand.remove_tile(tile);
            }
        }
        for i in 0..4usize {
            let from = direction.source_seat(i as u8) as usize;
            for &tile in &submissions[from] {
                seats[i].hand.add_tile(tile);
            }
            seats[i].exchange_tiles = None;
            seats[i].ready = false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    fn seats_with_marked_tiles() -> Vec<Seat> {
        // 每家 3 张专属点数的条子，方便断言流向
        (0..4u8)
            .map(|i| {
                let mut seat = Seat::new(i, format!("bot-{i}"), format!("电脑 {}", i + 1), true);
                let tile = Tile::Bamboo(i + 1);
                for _ in 0..3 {
                    seat.hand.add_tile(tile);
                }
                seat.exchange_tiles = Some([tile, tile, tile]);
                seat.ready = true;
                seat
            })
            .collect()
    }

    #[test]
    fn test_direction_source_mapping() {
        assert_eq!(ExchangeDirection::Previous.source_seat(0), 3);
        assert_eq!(ExchangeDirection::Next.source_seat(0), 1);
        assert_eq!(ExchangeDirection::Across.source_seat(0), 2);
        assert_eq!(ExchangeDirection::Across.source_seat(3), 1);
    }

    #[test]
    fn test_apply_across() {
        let mut seats = seats_with_marked_tiles();
        assert!(ExchangeHandler::apply(&mut seats, ExchangeDirection::Across));

        // 0 和 2 互换，1 和 3 互换
        assert_eq!(seats[0].hand.tile_count(Tile::Bamboo(3)), 3);
        assert_eq!(seats[2].hand.tile_count(Tile::Bamboo(1)), 3);
        assert_eq!(seats[1].hand.tile_count(Tile::Bamboo(4)), 3);
        assert_eq!(seats[3].hand.tile_count(Tile::Bamboo(2)), 3);

        // 缓存和就绪标志清空，总牌数不变
        for seat in &seats {
            assert!(seat.exchange_tiles.is_none());
            assert!(!seat.ready);
            assert_eq!(seat.hand.total_count(), 3);
        }
    }

    #[test]
    fn test_apply_previous() {
        let mut seats = seats_with_marked_tiles();
        assert!(ExchangeHandler::apply(&mut seats, ExchangeDirection::Previous));

        // 每家收上家的牌
        assert_eq!(seats[0].hand.tile_count(Tile::Bamboo(4)), 3);
        assert_eq!(seats[1].hand.tile_count(Tile::Bamboo(1)), 3);
        assert_eq!(seats[2].hand.tile_count(Tile::Bamboo(2)), 3);
        assert_eq!(seats[3].hand.tile_count(Tile::Bamboo(3)), 3);
    }

    #[test]
    fn test_apply_rejects_missing_submission() {
        let mut seats = seats_with_marked_tiles();
        seats[2].exchange_tiles = None;
        assert!(!ExchangeHandler::apply(&mut seats, ExchangeDirection::Across));
        // 状态未被破坏
        assert_eq!(seats[0].hand.tile_count(Tile::Bamboo(1)), 3);
    }

    #[test]
    fn test_apply_rejects_tiles_not_in_hand() {
        let mut seats = seats_with_marked_tiles();
        // 提交了手里没有的牌
        seats[1].exchange_tiles = Some([Tile::Dot(9), Tile::Dot(9), Tile::Dot(9)]);
        assert!(!ExchangeHandler::apply(&mut seats, ExchangeDirection::Across));
    }
}
