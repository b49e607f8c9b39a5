use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::hand::HandRank;

/// Категория покерной руки по силе (1..=10).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl HandCategory {
    /// От слабейшей к сильнейшей.
    pub const ALL: [HandCategory; 10] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(v: u8) -> Option<Self> {
        match v {
            1..=10 => Some(Self::ALL[(v - 1) as usize]),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }

    /// Из скольких одинаковых значений состоят группы руки (по порядку ключа).
    pub(crate) fn group_sizes(self) -> &'static [usize] {
        match self {
            HandCategory::FourOfAKind => &[4, 1],
            HandCategory::FullHouse => &[3, 2],
            HandCategory::ThreeOfAKind => &[3, 1, 1],
            HandCategory::TwoPair => &[2, 2, 1],
            HandCategory::OnePair => &[2, 1, 1, 1],
            _ => &[1, 1, 1, 1, 1],
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Тай-брейк внутри категории: значения карт по убыванию значимости
/// (группы, затем кикеры). Неиспользуемые позиции = 0.
/// Туз в wheel записывается как 1.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TieBreak(pub [u8; 5]);

impl TieBreak {
    pub fn from_values(values: &[u8]) -> Self {
        let mut out = [0u8; 5];
        for (slot, v) in out.iter_mut().zip(values) {
            *slot = *v;
        }
        TieBreak(out)
    }

    /// Значимые значения (без нулей-заполнителей).
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied().filter(|v| *v != 0)
    }
}

impl HandRank {
    /// Собрать HandRank из категории и тай-брейка.
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][k0:4][k1:4][k2:4][k3:4][k4:4]
    /// Значения 0..=14 влезают в 4 бита.
    pub fn new(category: HandCategory, key: TieBreak) -> Self {
        let value = key
            .0
            .iter()
            .fold((category as u32) & 0x0F, |acc, k| (acc << 4) | (*k as u32 & 0x0F));
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_value(((self.0 >> 20) & 0x0F) as u8).unwrap_or(HandCategory::HighCard)
    }

    /// Достать тай-брейк из HandRank.
    pub fn tie_break(&self) -> TieBreak {
        let mut out = [0u8; 5];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = ((self.0 >> (16 - 4 * i as u32)) & 0x0F) as u8;
        }
        TieBreak(out)
    }

    pub fn label(&self) -> &'static str {
        self.category().label()
    }
}

/// Человеческое описание руки: категория и значения ключа.
pub fn describe_hand(rank: HandRank) -> String {
    let values: Vec<String> = rank
        .tie_break()
        .values()
        .map(|v| match v {
            1 | 14 => "A".to_string(),
            13 => "K".to_string(),
            12 => "Q".to_string(),
            11 => "J".to_string(),
            10 => "T".to_string(),
            n => n.to_string(),
        })
        .collect();
    format!("{} ({})", rank.label(), values.join(" "))
}
