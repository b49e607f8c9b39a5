use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Константы масок для всех возможных стритов (5 подряд).
/// Индексация по "старшей карте" стрита.
///
/// Индексы:
///   0: A-5 (wheel)     : A2345
///   1: 6-2             : 23456
///   2: 7-3             : 34567
///   3: 8-4             : 45678
///   4: 9-5             : 56789
///   5: T-6             : 6789T
///   6: J-7             : 789TJ
///   7: Q-8             : 89TJQ
///   8: K-9             : 9TJQK
///   9: A-T (broadway)  : TJQKA
pub const STRAIGHT_MASKS: [RankMask; 10] = [
    mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]),
    mask_from_ranks(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]),
    mask_from_ranks(&[Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven]),
    mask_from_ranks(&[Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight]),
    mask_from_ranks(&[Rank::Five, Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine]),
    mask_from_ranks(&[Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten]),
    mask_from_ranks(&[Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack]),
    mask_from_ranks(&[Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen]),
    mask_from_ranks(&[Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King]),
    mask_from_ranks(&[Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]),
];

/// Получить битовую маску для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank as u8 - 2)
}

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        let r = ranks[i] as u8;
        mask |= 1 << (r - 2);
        i += 1;
    }
    mask
}

/// Найти стрит в битовой маске рангов.
/// Возвращает значение старшей карты стрита (5..=14), если он есть.
///
/// Особый случай: wheel (A2345) → 5, он младше стрита до шестёрки.
pub fn detect_straight(rank_mask: RankMask) -> Option<u8> {
    // Проверяем от самого сильного (broadway) к слабейшему.
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|(_, &sm)| rank_mask & sm == sm)
        .map(|(i, _)| i as u8 + 5)
}

/// Значения карт стрита от старшей к младшей. Туз в wheel идёт как 1.
pub fn straight_values(high: u8) -> [u8; 5] {
    [high, high - 1, high - 2, high - 3, if high == 5 { 1 } else { high - 4 }]
}

/// До `n` старших рангов из маски (значения 2..=14, по убыванию).
pub fn top_values(mask: RankMask, n: usize) -> Vec<u8> {
    (0..13u8)
        .rev()
        .filter(|bit| mask & (1 << bit) != 0)
        .map(|bit| bit + 2)
        .take(n)
        .collect()
}
