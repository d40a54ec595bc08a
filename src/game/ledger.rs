use crate::game::player::Seat;
use crate::game::win_eval;

/// 流局时未叫牌的罚分（赔给每个听牌家）
pub const TING_PENALTY: i32 = 8;

/// 结算条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    /// 胡牌收分
    Hu,
    /// 点炮赔分
    Pao,
    /// 流局时已听牌
    Ting,
    /// 流局时未叫牌
    NoTing,
}

/// 结算流水条目
///
/// 分数变动发生时同步写入 `Seat::score`，条目仅作展示与核对；
/// 一局内所有条目的 `points` 之和恒为零
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LedgerEntry {
    /// 座位号
    pub seat: u8,
    /// 座位昵称
    pub name: String,
    /// 条目类型
    pub kind: LedgerKind,
    /// 分数变动（正为收、负为赔）
    pub points: i32,
    /// 展示文案
    pub description: String,
}

/// 分数结算器
///
/// 三种结算场景：点炮胡、自摸、流局查叫。每个函数直接修改
/// 座位分数并返回对应的流水条目
pub struct ScoreLedger;

impl ScoreLedger {
    /// 点炮胡结算：赢家收分，点炮者一家付清
    pub fn settle_discard_hu(
        seats: &mut [Seat],
        winner: u8,
        discarder: u8,
        fan: u32,
    ) -> Vec<LedgerEntry> {
        let points = win_eval::points_for_win(fan, false);
        seats[winner as usize].score += points;
        seats[discarder as usize].score -= points;

        vec![
            LedgerEntry {
                seat: winner,
                name: seats[winner as usize].name.clone(),
                kind: LedgerKind::Hu,
                points,
                description: format!("点炮胡 {fan}番 (+{points}分)"),
            },
            LedgerEntry {
                seat: discarder,
                name: seats[discarder as usize].name.clone(),
                kind: LedgerKind::Pao,
                points: -points,
                description: format!("点炮 (-{points}分)"),
            },
        ]
    }

    /// 自摸结算：其余每个未离场座位各付一份加倍分
    pub fn settle_self_draw(seats: &mut [Seat], winner: u8, fan: u32) -> Vec<LedgerEntry> {
        let points = win_eval::points_for_win(fan, true);

        let payers: Vec<u8> = seats
            .iter()
            .filter(|s| s.id != winner && !s.is_out)
            .map(|s| s.id)
            .collect();
        let total = points * payers.len() as i32;

        for &id in &payers {
            seats[id as usize].score -= points;
        }
        seats[winner as usize].score += total;

        let mut entries = vec![LedgerEntry {
            seat: winner,
            name: seats[winner as usize].name.clone(),
            kind: LedgerKind::Hu,
            points: total,
            description: format!("自摸 {fan}番 (+{total}分)"),
        }];
        for &id in &payers {
            entries.push(LedgerEntry {
                seat: id,
                name: seats[id as usize].name.clone(),
                kind: LedgerKind::Pao,
                points: -points,
                description: format!("被自摸 (-{points}分)"),
            });
        }
        entries
    }

    /// 流局查叫：未叫牌的座位赔给每个听牌座位一份罚分
    ///
    /// 同时把查叫结果写回 `Seat::is_ting`，离场座位不参与
    pub fn settle_deck_empty(seats: &mut [Seat]) -> Vec<LedgerEntry> {
        let mut ting = Vec::new();
        let mut no_ting = Vec::new();

        for seat in seats.iter_mut() {
            if seat.is_out {
                continue;
            }
            let waiting = win_eval::evaluate_ting(&seat.hand, &seat.melds, seat.forbidden_suit);
            seat.is_ting = !waiting.is_empty();
            if seat.is_ting {
                ting.push(seat.id);
            } else {
                no_ting.push(seat.id);
            }
        }

        let mut entries = Vec::new();
        for &id in &ting {
            let gain = TING_PENALTY * no_ting.len() as i32;
            seats[id as usize].score += gain;
            entries.push(LedgerEntry {
                seat: id,
                name: seats[id as usize].name.clone(),
                kind: LedgerKind::Ting,
                points: gain,
                description: format!("听牌 (+{gain}分)"),
            });
        }
        for &id in &no_ting {
            let loss = TING_PENALTY * ting.len() as i32;
            seats[id as usize].score -= loss;
            entries.push(LedgerEntry {
                seat: id,
                name: seats[id as usize].name.clone(),
                kind: LedgerKind::NoTing,
                points: -loss,
                description: format!("未叫，赔付 {} 家各 {TING_PENALTY} 分", ting.len()),
            });
        }
        entries
    }
}
