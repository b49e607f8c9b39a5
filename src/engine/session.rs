use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::{ActionSource, TableObserver};
use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::{PlayerId, SeatIndex, Table, TableConfig};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{play_hand, HandResult};
use crate::engine::positions::next_button;
use crate::engine::RandomSource;
use crate::infra::IdAllocator;

/// Строка таблицы лидеров.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub stack: Chips,
    /// None – игрок выбыл.
    pub seat: Option<SeatIndex>,
}

/// Выбывший игрок и номер раздачи, после которой он выбыл.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Elimination {
    pub player_id: PlayerId,
    pub name: String,
    pub stack: Chips,
    pub after_hand: u64,
}

/// Чем закончилась серия раздач.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionOutcome {
    pub hands_played: u64,
    /// Победитель, если за столом остался один игрок.
    pub winner: Option<PlayerId>,
}

/// Игровая сессия за одним столом: игроки сохраняются между раздачами,
/// кнопка переходит по кругу, выбывшие освобождают места.
pub struct Session<R: RandomSource> {
    table: Table,
    ids: IdAllocator,
    rng: R,
    hands_played: u64,
    eliminated: Vec<Elimination>,
}

impl<R: RandomSource> Session<R> {
    pub fn new(config: TableConfig, rng: R) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            table: Table::new(config),
            ids: IdAllocator::new(),
            rng,
            hands_played: 0,
            eliminated: Vec::new(),
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    pub fn eliminated(&self) -> &[Elimination] {
        &self.eliminated
    }

    /// Посадить игрока на первое свободное место.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        stack: Chips,
    ) -> Result<(SeatIndex, PlayerId), EngineError> {
        let seat = (0..self.table.max_seats())
            .find(|&s| self.table.is_seat_empty(s))
            .ok_or(EngineError::TableFull)?;
        self.seat_player_at(seat, name, stack)
    }

    /// Посадить игрока на конкретное место.
    pub fn seat_player_at(
        &mut self,
        seat: SeatIndex,
        name: impl Into<String>,
        stack: Chips,
    ) -> Result<(SeatIndex, PlayerId), EngineError> {
        // ID выдаём только если место действительно свободно.
        match self.table.seats.get(seat as usize) {
            None => return Err(EngineError::InvalidSeat(seat)),
            Some(Some(_)) => return Err(EngineError::SeatTaken(seat)),
            Some(None) => {}
        }
        let id = self.ids.next_player_id();
        self.table.seat_player(seat, Player::new(id, name, stack))?;
        Ok((seat, id))
    }

    /// За столом остался один игрок (или никого).
    pub fn is_finished(&self) -> bool {
        self.table.seated_count() <= 1
    }

    pub fn winner(&self) -> Option<&Player> {
        if self.table.seated_count() == 1 {
            self.table.occupied().map(|(_, p)| p).next()
        } else {
            None
        }
    }

    /// Сыграть следующую раздачу и убрать выбывших.
    ///
    /// При ошибке стол остаётся в состоянии до раздачи.
    pub fn play_next_hand<S, O>(
        &mut self,
        source: &mut S,
        observer: &mut O,
    ) -> Result<HandResult, EngineError>
    where
        S: ActionSource + ?Sized,
        O: TableObserver + ?Sized,
    {
        if self.table.seated_count() < 2 {
            return Err(EngineError::NotEnoughPlayers);
        }
        let button = next_button(&self.table).ok_or(EngineError::NotEnoughPlayers)?;
        let hand_id = self.ids.next_hand_id();

        let result = play_hand(&mut self.table, button, hand_id, &mut self.rng, source, observer)?;
        self.hands_played += 1;

        // Список выбывших уже собран – теперь освобождаем места.
        for &seat in &result.eliminated {
            if let Some(player) = self.table.remove_player(seat) {
                info!(
                    player_id = player.id,
                    name = %player.name,
                    stack = player.stack.0,
                    hand_id,
                    "игрок выбыл"
                );
                self.eliminated.push(Elimination {
                    player_id: player.id,
                    name: player.name,
                    stack: player.stack,
                    after_hand: hand_id,
                });
            }
        }

        Ok(result)
    }

    /// Играть, пока не останется один игрок или не кончится лимит раздач.
    pub fn play_until_winner<S, O>(
        &mut self,
        source: &mut S,
        observer: &mut O,
        max_hands: u64,
    ) -> Result<SessionOutcome, EngineError>
    where
        S: ActionSource + ?Sized,
        O: TableObserver + ?Sized,
    {
        let mut played = 0;
        while !self.is_finished() && played < max_hands {
            self.play_next_hand(source, observer)?;
            played += 1;
        }

        let winner = self.winner().map(|p| p.id);
        if let Some(id) = winner {
            info!(player_id = id, hands = self.hands_played, "победитель определён");
        }
        Ok(SessionOutcome {
            hands_played: played,
            winner,
        })
    }

    /// Таблица лидеров: сидящие по убыванию стека, затем выбывшие
    /// (последний выбывший выше).
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut seated: Vec<LeaderboardEntry> = self
            .table
            .occupied()
            .map(|(seat, p)| LeaderboardEntry {
                player_id: p.id,
                name: p.name.clone(),
                stack: p.stack,
                seat: Some(seat),
            })
            .collect();
        seated.sort_by(|a, b| b.stack.cmp(&a.stack).then(a.player_id.cmp(&b.player_id)));

        seated.extend(self.eliminated.iter().rev().map(|e| LeaderboardEntry {
            player_id: e.player_id,
            name: e.name.clone(),
            stack: e.stack,
            seat: None,
        }));
        seated
    }
}
