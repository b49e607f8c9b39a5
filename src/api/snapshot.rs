use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerStatus;
use crate::domain::{PlayerId, SeatIndex, Table};
use crate::engine::betting::{BettingState, RoundState};
use crate::eval::hand_rank::describe_hand;

/// Публичное состояние игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSnapshot {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub name: String,
    pub stack: Chips,
    /// Ставка на текущей улице.
    pub current_bet: Chips,
    /// Всего внесено за раздачу.
    pub committed: Chips,
    pub status: PlayerStatus,
    /// Карманные карты – только после вскрытия на шоудауне.
    pub hole_cards: Option<Vec<Card>>,
    /// Название комбинации на шоудауне, например "Flush (A K 9 7 2)".
    pub hand_label: Option<String>,
}

/// Снимок стола только для чтения: всё, что нужно для отрисовки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
    pub street: Street,
    pub button: Option<SeatIndex>,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub current_bet: Chips,
    pub min_raise: Chips,
    /// Чей сейчас ход (если идёт торговля).
    pub to_act: Option<SeatIndex>,
    pub seats: Vec<SeatSnapshot>,
}

impl TableSnapshot {
    pub fn capture(table: &Table, betting: Option<&BettingState>) -> Self {
        let seats = table
            .occupied()
            .map(|(seat, p)| SeatSnapshot {
                seat,
                player_id: p.id,
                name: p.name.clone(),
                stack: p.stack,
                current_bet: p.current_bet,
                committed: p.committed,
                status: p.status,
                hole_cards: p.showdown.map(|_| p.hole_cards.clone()),
                hand_label: p.showdown.map(describe_hand),
            })
            .collect();

        let to_act = betting.and_then(|b| match b.state(table) {
            RoundState::AwaitingAction(seat) => Some(seat),
            _ => None,
        });

        Self {
            street: table.street,
            button: table.button,
            board: table.board.clone(),
            total_pot: table.total_pot(),
            current_bet: betting.map_or(Chips::ZERO, |b| b.current_bet),
            min_raise: betting.map_or(table.config.big_blind, |b| b.min_raise),
            to_act,
            seats,
        }
    }

    pub fn seat(&self, seat: SeatIndex) -> Option<&SeatSnapshot> {
        self.seats.iter().find(|s| s.seat == seat)
    }
}
