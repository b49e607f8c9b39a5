use crate::domain::{Chips, SeatIndex};

use thiserror::Error;

/// Ошибки движка покера.
///
/// Делятся на две группы:
/// - недопустимые действия игрока ([`EngineError::is_recoverable`]) – состояние
///   не меняется, игрока переспрашивают;
/// - всё остальное – ошибка интеграции или логики, раздача прерывается.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    // ---------- недопустимые действия (переспрос) ----------
    #[error("Невозможно выполнить check – нужно хотя бы уравнять ставку")]
    CannotCheck,

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    CannotCall,

    #[error("Bet возможен только пока никто не открыл торговлю")]
    BetNotAllowed,

    #[error("Raise невозможен – ставки ещё нет, используйте bet")]
    RaiseNotAllowed,

    #[error("Ставка должна быть больше нуля")]
    ZeroBet,

    #[error("Размер рейза слишком мал: минимум до {min_total}")]
    RaiseTooSmall { min_total: Chips },

    #[error("Недостаточно фишек для этой ставки")]
    NotEnoughChips,

    #[error("У игрока нет фишек для all-in")]
    NothingToCommit,

    #[error("Игрок на месте {0} не может действовать")]
    PlayerCannotAct(SeatIndex),

    // ---------- фатальные ----------
    #[error("В колоде не хватает карт: нужно {requested}, осталось {remaining}")]
    DeckExhausted { requested: usize, remaining: usize },

    #[error("Для оценки руки нужно минимум 5 разных карт, передано {0}")]
    InsufficientCards(usize),

    #[error("Нарушен инвариант: {0}")]
    InvariantViolation(String),

    #[error("Недостаточно игроков с фишками для раздачи")]
    NotEnoughPlayers,

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Место {0} уже занято")]
    SeatTaken(SeatIndex),

    #[error("За столом нет свободных мест")]
    TableFull,

    #[error("В месте {0} нет игрока")]
    EmptySeat(SeatIndex),

    #[error("Источник действий не дал допустимого решения для места {seat}")]
    ActionSourceStalled { seat: SeatIndex },

    #[error("Некорректный конфиг стола: {0}")]
    InvalidConfig(&'static str),

    #[error("Не удалось разобрать конфиг: {0}")]
    ConfigParse(String),
}

impl EngineError {
    /// Ошибка относится к недопустимому действию: её возвращают источнику действий,
    /// состояние раунда не меняется.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::CannotCheck
                | EngineError::CannotCall
                | EngineError::BetNotAllowed
                | EngineError::RaiseNotAllowed
                | EngineError::ZeroBet
                | EngineError::RaiseTooSmall { .. }
                | EngineError::NotEnoughChips
                | EngineError::NothingToCommit
                | EngineError::PlayerCannotAct(_)
        )
    }
}
