use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::Player;
use crate::engine::errors::EngineError;

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

pub const MIN_SEATS: u8 = 2;
pub const MAX_SEATS: u8 = 10;

/// Конфиг стола: сколько мест, блайнды, лимит переспросов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    /// Максимальное количество мест за столом (2–10).
    pub max_seats: u8,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Сколько раз подряд можно отклонить/отменить решение одного игрока,
    /// прежде чем раздача будет прервана.
    pub max_prompts_per_turn: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_seats: MAX_SEATS,
            small_blind: Chips(1),
            big_blind: Chips(2),
            max_prompts_per_turn: 64,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.max_seats) {
            return Err(EngineError::InvalidConfig("max_seats должен быть в 2..=10"));
        }
        if self.big_blind.is_zero() {
            return Err(EngineError::InvalidConfig("big_blind должен быть больше нуля"));
        }
        if self.small_blind > self.big_blind {
            return Err(EngineError::InvalidConfig("small_blind больше big_blind"));
        }
        if self.max_prompts_per_turn == 0 {
            return Err(EngineError::InvalidConfig("max_prompts_per_turn должен быть больше нуля"));
        }
        Ok(())
    }

    /// Прочитать конфиг из JSON. Отсутствующие поля берутся из `Default`.
    pub fn from_json_str(s: &str) -> Result<Self, EngineError> {
        let cfg: TableConfig =
            serde_json::from_str(s).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Основное состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    /// None – место пустое. Индексы стабильны: выбывший игрок
    /// освобождает место, но не сдвигает остальных.
    pub seats: Vec<Option<Player>>,

    /// Общие карты борда (0–5 карт).
    pub board: Vec<Card>,

    /// Дилерская кнопка текущей (или последней) раздачи.
    pub button: Option<SeatIndex>,

    pub street: Street,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(config: TableConfig) -> Self {
        let seats = vec![None; config.max_seats as usize];
        Self {
            config,
            seats,
            board: Vec::new(),
            button: None,
            street: Street::Preflop,
        }
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_seats
    }

    /// Посадить игрока на свободное место.
    pub fn seat_player(&mut self, seat: SeatIndex, player: Player) -> Result<(), EngineError> {
        let slot = self
            .seats
            .get_mut(seat as usize)
            .ok_or(EngineError::InvalidSeat(seat))?;
        if slot.is_some() {
            return Err(EngineError::SeatTaken(seat));
        }
        *slot = Some(player);
        Ok(())
    }

    /// Освободить место, вернув игрока.
    pub fn remove_player(&mut self, seat: SeatIndex) -> Option<Player> {
        self.seats.get_mut(seat as usize).and_then(Option::take)
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_seat_empty(&self, index: SeatIndex) -> bool {
        self.seats
            .get(index as usize)
            .map(|s| s.is_none())
            .unwrap_or(true)
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&Player> {
        self.seats.get(seat as usize).and_then(Option::as_ref)
    }

    pub fn player_mut(&mut self, seat: SeatIndex) -> Option<&mut Player> {
        self.seats.get_mut(seat as usize).and_then(Option::as_mut)
    }

    /// Занятые места по возрастанию индекса.
    pub fn occupied(&self) -> impl Iterator<Item = (SeatIndex, &Player)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i as SeatIndex, p)))
    }

    /// Сколько игроков не сфолдило.
    pub fn live_count(&self) -> usize {
        self.occupied().filter(|(_, p)| p.is_live()).count()
    }

    /// Сумма всех вкладов в банк за раздачу.
    pub fn total_pot(&self) -> Chips {
        self.occupied().map(|(_, p)| p.committed).sum()
    }

    /// Все фишки за столом: стеки + банк.
    pub fn total_chips(&self) -> Chips {
        self.occupied().map(|(_, p)| p.stack + p.committed).sum()
    }
}
