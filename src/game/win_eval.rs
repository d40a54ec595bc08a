use crate::game::player::{Meld, MeldKind};
use crate::tile::{Hand, Suit, Tile};
use smallvec::SmallVec;

/// 胡牌分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCategory {
    /// 七对（14 张手牌、无碰杠）
    SevenPairs,
    /// 刻子胡（对子 + 若干刻子，本变体没有顺子）
    AllTriplets,
}

/// 胡牌判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinEval {
    /// 是否胡牌
    pub can_win: bool,
    /// 胡牌分类
    pub category: Option<WinCategory>,
    /// 番数（得分指数）
    pub fan: u32,
}

impl WinEval {
    fn no_win() -> Self {
        Self {
            can_win: false,
            category: None,
            fan: 0,
        }
    }
}

/// 判定手牌是否胡牌
///
/// # 算法
///
/// 1. 手牌中还有定缺门的牌 → 直接不胡
/// 2. 七对快速路径：无碰杠且恰好 14 张，七个相同对子（四张算两对）
/// 3. 标准路径：枚举对子，剩余牌递归回溯拆成清一色刻子
///
/// # 番数
///
/// - 七对：清一色 4 番，否则 2 番
/// - 标准：1（底番，全刻子）+ 每杠 1 + 金钩钓（手牌仅剩一对）1 + 清一色 2
///
/// # 参数
///
/// - `hand`: 手牌（含刚摸到/要胡的那张牌）
/// - `melds`: 已碰/杠的牌组
/// - `forbidden_suit`: 定缺的花色
pub fn evaluate_win(hand: &Hand, melds: &[Meld], forbidden_suit: Option<Suit>) -> WinEval {
    if let Some(suit) = forbidden_suit {
        if hand.has_suit(suit) {
            return WinEval::no_win();
        }
    }

    // 七对路径优先，命中后不再尝试标准路径
    if melds.is_empty() && hand.total_count() == 14 {
        if let Some(result) = check_seven_pairs(hand) {
            return result;
        }
    }

    check_all_triplets(hand, melds)
}

/// 检查七对
fn check_seven_pairs(hand: &Hand) -> Option<WinEval> {
    let mut pair_count = 0u8;
    for &count in hand.tiles_map().values() {
        match count {
            2 => pair_count += 1,
            // 四张相同的牌算作两个对子
            4 => pair_count += 2,
            _ => return None,
        }
    }

    if pair_count != 7 {
        return None;
    }

    let fan = if is_single_suit(hand, &[]) { 4 } else { 2 };
    Some(WinEval {
        can_win: true,
        category: Some(WinCategory::SevenPairs),
        fan,
    })
}

/// 检查标准胡牌型（对子 + 全刻子）
fn check_all_triplets(hand: &Hand, melds: &[Meld]) -> WinEval {
    let total = hand.total_count();
    if total < 2 || total % 3 != 2 {
        return WinEval::no_win();
    }

    // 按种类建立计数表
    let mut counts = [0u8; Tile::KIND_COUNT];
    for (tile, &count) in hand.tiles_map() {
        counts[tile.kind_index()] = count;
    }

    // 枚举对子，检查剩余牌能否全部拆成刻子
    let mut decomposed = false;
    for idx in 0..Tile::KIND_COUNT {
        if counts[idx] >= 2 {
            counts[idx] -= 2;
            if can_form_triplets(&mut counts) {
                decomposed = true;
                counts[idx] += 2;
                break;
            }
            counts[idx] += 2;
        }
    }

    if !decomposed {
        return WinEval::no_win();
    }

    let quads = melds.iter().filter(|m| m.kind == MeldKind::Quad).count() as u32;
    let mut fan = 1 + quads;
    if total == 2 {
        // 金钩钓：其余牌组全部已亮明，手里只剩将牌
        fan += 1;
    }
    if is_single_suit(hand, melds) {
        fan += 2;
    }

    WinEval {
        can_win: true,
        category: Some(WinCategory::AllTriplets),
        fan,
    }
}

/// 递归回溯：剩余计数能否全部拆成三张一组的刻子
///
/// 本变体没有顺子，任意一种有剩牌的种类必须凑满三张，否则整体失败
fn can_form_triplets(counts: &mut [u8; Tile::KIND_COUNT]) -> bool {
    for idx in 0..Tile::KIND_COUNT {
        if counts[idx] > 0 {
            if counts[idx] < 3 {
                return false;
            }
            counts[idx] -= 3;
            let ok = can_form_triplets(counts);
            counts[idx] += 3;
            return ok;
        }
    }
    true
}

/// 检查手牌加明牌是否清一色
fn is_single_suit(hand: &Hand, melds: &[Meld]) -> bool {
    let mut suit: Option<Suit> = None;
    let tiles = hand
        .distinct_tiles()
        .into_iter()
        .chain(melds.iter().map(|m| m.tile));
    for tile in tiles {
        match suit {
            None => suit = Some(tile.suit()),
            Some(s) if s != tile.suit() => return false,
            _ => {}
        }
    }
    suit.is_some()
}

/// 推导听牌集合
///
/// 对 27 种牌逐一按计数试插（跳过定缺门），能凑成胡牌型的牌即为
/// 可听牌；空集表示未听牌。试插在计数表上进行：手里已握满四张的
/// 牌同样参与判定，等第五张的牌型虽然永远等不到，查叫时仍算叫
pub fn evaluate_ting(
    hand: &Hand,
    melds: &[Meld],
    forbidden_suit: Option<Suit>,
) -> SmallVec<[Tile; 8]> {
    let mut waiting = SmallVec::new();

    if let Some(suit) = forbidden_suit {
        if hand.has_suit(suit) {
            return waiting;
        }
    }

    let mut counts = [0u8; Tile::KIND_COUNT];
    for (tile, &count) in hand.tiles_map() {
        counts[tile.kind_index()] = count;
    }
    let total = hand.total_count() + 1;

    for tile in Tile::all_kinds() {
        if Some(tile.suit()) == forbidden_suit {
            continue;
        }

        let idx = tile.kind_index();
        counts[idx] += 1;
        let wins = wins_with_counts(&mut counts, total, melds.is_empty());
        counts[idx] -= 1;
        if wins {
            waiting.push(tile);
        }
    }

    waiting
}

/// 计数表上的胡牌判定（只问能不能胡，不算番）
fn wins_with_counts(
    counts: &mut [u8; Tile::KIND_COUNT],
    total: usize,
    melds_empty: bool,
) -> bool {
    if melds_empty && total == 14 {
        let mut pairs = 0u8;
        let mut all_paired = true;
        for &count in counts.iter() {
            match count {
                0 => {}
                2 => pairs += 1,
                4 => pairs += 2,
                _ => {
                    all_paired = false;
                    break;
                }
            }
        }
        if all_paired && pairs == 7 {
            return true;
        }
    }

    if total < 2 || total % 3 != 2 {
        return false;
    }
    for idx in 0..Tile::KIND_COUNT {
        if counts[idx] >= 2 {
            counts[idx] -= 2;
            let ok = can_form_triplets(counts);
            counts[idx] += 2;
            if ok {
                return true;
            }
        }
    }
    false
}

/// 计算胡牌得分：2^番，自摸加倍
pub fn points_for_win(fan: u32, self_drawn: bool) -> i32 {
    let base = 1i32 << fan.min(20);
    if self_drawn {
        base * 2
    } else {
        base
    }
}
