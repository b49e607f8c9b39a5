use serde::{Deserialize, Serialize};

use crate::api::{TableObserver, TableSnapshot};
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{HandId, PlayerId, SeatIndex, Table};
use crate::engine::actions::{Action, ActionOutcome};
use crate::engine::betting::BettingState;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted {
        hand_id: HandId,
        button: SeatIndex,
    },

    /// Блайнды: (место, фактически поставлено).
    BlindsPosted {
        small_blind: Option<(SeatIndex, Chips)>,
        big_blind: Option<(SeatIndex, Chips)>,
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt {
        seat: SeatIndex,
        cards: Vec<Card>,
    },

    /// Открыты общие карты. `cards` – новые карты, `board` – весь борд после раздачи.
    BoardDealt {
        street: Street,
        cards: Vec<Card>,
        board: Vec<Card>,
    },

    /// Начался раунд ставок.
    StreetChanged {
        street: Street,
    },

    /// Действие игрока.
    PlayerActed {
        player_id: PlayerId,
        seat: SeatIndex,
        action: Action,
        outcome: ActionOutcome,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Действие отклонено, игрока спросят снова.
    ActionRejected {
        seat: SeatIndex,
        action: Action,
        reason: String,
    },

    /// Источник действий отменил решение.
    DecisionCancelled {
        seat: SeatIndex,
    },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        player_id: PlayerId,
        hole_cards: Vec<Card>,
        best_five: Vec<Card>,
        rank_value: u32,
        label: String,
    },

    /// Выплата банка (0 – основной, дальше сайд-поты по порядку создания).
    PotAwarded {
        pot_index: usize,
        seat: SeatIndex,
        player_id: PlayerId,
        amount: Chips,
    },

    /// Банк без живых претендентов возвращён внёсшим.
    PotRefunded {
        pot_index: usize,
        seat: SeatIndex,
        amount: Chips,
    },

    /// Раздача завершена.
    HandFinished {
        hand_id: HandId,
    },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) -> &HandEvent {
        let index = self.events.len() as u32;
        self.events.push(HandEvent { index, kind });
        &self.events[self.events.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Все действия игроков (для реплея и тестов).
    pub fn actions(&self) -> impl Iterator<Item = (SeatIndex, Action)> + '_ {
        self.events.iter().filter_map(|e| match e.kind {
            HandEventKind::PlayerActed { seat, action, .. } => Some((seat, action)),
            _ => None,
        })
    }
}

/// Записать событие в историю и показать его наблюдателю вместе со снимком стола.
pub(crate) fn record_event<O>(
    history: &mut HandHistory,
    observer: &mut O,
    table: &Table,
    betting: Option<&BettingState>,
    kind: HandEventKind,
) where
    O: TableObserver + ?Sized,
{
    let event = history.push(kind);
    let snapshot = TableSnapshot::capture(table, betting);
    observer.on_event(event, &snapshot);
}
