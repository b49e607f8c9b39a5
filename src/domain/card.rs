use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Масть карты. Числовое значение 1..=4 (Clubs..Spades).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs = 1,    // ♣
    Diamonds = 2, // ♦
    Hearts = 3,   // ♥
    Spades = 4,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Индекс 0..4 для табличных подсчётов.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub fn from_value(v: u8) -> Option<Suit> {
        match v {
            1 => Some(Suit::Clubs),
            2 => Some(Suit::Diamonds),
            3 => Some(Suit::Hearts),
            4 => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Ранг карты. Значение 2..=14, туз старший (14).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// От младшего к старшему.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(v: u8) -> Option<Rank> {
        match v {
            2..=14 => Some(Rank::ALL[(v - 2) as usize]),
            _ => None,
        }
    }
}

/// Обычная покерная карта (52-карточная колода).
/// Равенство – по паре (rank, suit).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Карта из числовых значений: value 2..=14, suit 1..=4.
    pub fn from_values(value: u8, suit: u8) -> Option<Self> {
        Some(Self {
            rank: Rank::from_value(value)?,
            suit: Suit::from_value(suit)?,
        })
    }

    /// Уникальный индекс 0..52 (удобно для битовых множеств).
    pub const fn index(self) -> usize {
        self.suit.index() * 13 + (self.rank as usize - 2)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "Ah", "Td", "7c".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (r_ch, s_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => return Err("Card string must have length 2".into()),
        };

        let rank = match r_ch {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            'A' | 'a' => Rank::Ace,
            _ => return Err(format!("Invalid rank: {r_ch}")),
        };

        let suit = match s_ch {
            'c' | 'C' => Suit::Clubs,
            'd' | 'D' => Suit::Diamonds,
            'h' | 'H' => Suit::Hearts,
            's' | 'S' => Suit::Spades,
            _ => return Err(format!("Invalid suit: {s_ch}")),
        };

        Ok(Card { rank, suit })
    }
}

/// Разобрать список карт через пробел: "Ah Kd 7c".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, String> {
    s.split_whitespace().map(str::parse).collect()
}
