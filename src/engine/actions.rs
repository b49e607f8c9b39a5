use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId, SeatIndex, Street};

/// Действие игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    /// Уравнять текущую ставку. Если фишек не хватает – автоматический фолд.
    Call,
    /// Bet на улице, где ещё никто не ставил. Сумма – сколько поставить.
    Bet(Chips),
    /// Raise существующей ставки. Сумма – итоговая ставка игрока на улице ("raise to").
    Raise(Chips),
    /// All-in – поставить весь стек, без ограничения минимумом.
    AllIn,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call => ActionKind::Call,
            Action::Bet(_) => ActionKind::Bet,
            Action::Raise(_) => ActionKind::Raise,
            Action::AllIn => ActionKind::AllIn,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => f.write_str("fold"),
            Action::Check => f.write_str("check"),
            Action::Call => f.write_str("call"),
            Action::Bet(a) => write!(f, "bet {a}"),
            Action::Raise(a) => write!(f, "raise to {a}"),
            Action::AllIn => f.write_str("all in"),
        }
    }
}

/// Тип действия без суммы – для набора допустимых действий.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

/// Решение источника действий.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Decision {
    Act(Action),
    /// Отмена ввода: состояние не меняется, игрока спросят ещё раз.
    Cancelled,
}

/// Что разрешено игроку прямо сейчас.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalActions {
    pub kinds: Vec<ActionKind>,
    /// Сколько доплатить до call.
    pub to_call: Chips,
    /// Минимальная итоговая ставка для raise (или минимальный bet).
    pub min_raise_to: Chips,
    /// Максимум, который игрок может иметь в ставке на улице (ставка + стек).
    pub max_total: Chips,
}

impl LegalActions {
    pub fn allows(&self, kind: ActionKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Запрос решения у источника действий.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRequest {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub street: Street,
    pub legal: LegalActions,
    pub current_bet: Chips,
    /// Минимальный размер повышения (приращение к current_bet).
    pub min_raise: Chips,
    pub stack: Chips,
    pub player_bet: Chips,
    pub pot: Chips,
}

/// Что фактически произошло после применения действия.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Сколько фишек игрок добавил в банк этим действием.
    pub paid: Chips,
    /// Действие подняло ставку и заново открыло торговлю.
    pub reopened: bool,
    /// Call без достаточного стека превратился в фолд.
    pub auto_folded: bool,
    pub all_in: bool,
}
