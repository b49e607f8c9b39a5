use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId, SeatIndex};

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Сколько общих карт открывается в начале улицы.
    pub const fn cards_to_deal(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }

    pub const fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Street::Preflop => "First Betting Round: Preflop",
            Street::Flop => "Second Betting Round: The Flop",
            Street::Turn => "Third Betting Round: The Turn",
            Street::River => "Final Betting Round: The River",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(s)
    }
}

/// Сила руки, упакованная в u32: категория в старших битах, тай-брейк ниже.
/// Сравнение чисел даёт полный порядок между любыми двумя руками.
/// Кодирование и разбор – в `eval::hand_rank`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Результат конкретного игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    /// Итоговый ранг руки (если дошёл до шоудауна).
    pub rank: Option<HandRank>,
    /// Сколько выиграно из банков.
    pub won: Chips,
    /// Изменение стека относительно начала раздачи.
    pub net: i64,
    /// Является ли игрок победителем (включая сплит).
    pub is_winner: bool,
}

/// Краткое описание завершённой раздачи. Удобно для истории/реплеера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub street_reached: Street,
    pub went_to_showdown: bool,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub results: Vec<PlayerHandResult>,
}
