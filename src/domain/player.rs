use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::HandRank;
use crate::domain::PlayerId;

/// Статус игрока в текущей раздаче.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок в раздаче и может действовать.
    Active,
    /// Игрок сфолдил и больше не претендует на банк.
    Folded,
    /// Игрок в оллыне – не может больше делать ставки.
    AllIn,
}

/// Игрок за столом.
///
/// `id` выдаётся один раз владельцем сессии и не переиспользуется.
/// Поля раздачи (`current_bet`, `committed`, `hole_cards`, `status`, `showdown`,
/// `winnings`) сбрасываются в начале каждой раздачи через [`Player::reset_for_hand`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Текущий стек.
    pub stack: Chips,
    /// Ставка на текущей улице.
    pub current_bet: Chips,
    /// Сколько всего внесено в банк за раздачу (все улицы).
    pub committed: Chips,
    /// Стек на момент начала раздачи.
    pub stack_at_start: Chips,
    pub status: PlayerStatus,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Сила руки, считается только на шоудауне.
    pub showdown: Option<HandRank>,
    /// Выигрыш в текущей раздаче.
    pub winnings: Chips,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            current_bet: Chips::ZERO,
            committed: Chips::ZERO,
            stack_at_start: stack,
            status: PlayerStatus::Active,
            hole_cards: Vec::new(),
            showdown: None,
            winnings: Chips::ZERO,
        }
    }

    pub fn reset_for_hand(&mut self) {
        self.current_bet = Chips::ZERO;
        self.committed = Chips::ZERO;
        self.stack_at_start = self.stack;
        self.status = PlayerStatus::Active;
        self.hole_cards.clear();
        self.showdown = None;
        self.winnings = Chips::ZERO;
    }

    /// Не сфолдил (в том числе all-in).
    pub fn is_live(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может ещё действовать на этой улице.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    pub fn is_all_in(&self) -> bool {
        self.status == PlayerStatus::AllIn
    }

    /// Сколько нужно доплатить до `target`.
    pub fn to_call(&self, target: Chips) -> Chips {
        target.saturating_sub(self.current_bet)
    }

    /// Переложить из стека в ставку не более `amount`.
    /// Возвращает реально внесённую сумму. Пустой стек => all-in.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        self.committed += paid;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    pub fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }

    /// `stack + committed == stack_at_start` (до выплат).
    pub fn chips_balanced(&self) -> bool {
        self.stack.0 + self.committed.0 == self.stack_at_start.0
    }
}
