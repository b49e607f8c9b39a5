use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{ActionSource, TableObserver};
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{SeatIndex, Table};
use crate::engine::actions::{Action, ActionOutcome, ActionRequest, Decision};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{record_event, HandEventKind, HandHistory};
use crate::engine::positions::{collect_occupied_seats_from, seats_after};
use crate::engine::validation::{legal_actions, validate_action};

/// Состояние раунда ставок с точки зрения внешнего кода.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundState {
    /// Ждём решения от игрока на этом месте.
    AwaitingAction(SeatIndex),
    /// Все активные уравняли ставку и высказались после последнего повышения.
    RoundComplete,
    /// Остался один несфолдивший игрок – раздача решена без следующих улиц.
    HandDecidedByFold,
}

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Seat последнего агрессора (bet/raise/all-in).
    pub last_aggressor: Option<SeatIndex>,
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Очередь ходящих (по кругу), кто ещё должен сделать действие на этой улице.
    /// После каждого повышения пересобирается из всех активных мест после агрессора.
    pub to_act: Vec<SeatIndex>,
}

impl BettingState {
    pub fn new(street: Street, current_bet: Chips, min_raise: Chips, to_act: Vec<SeatIndex>) -> Self {
        Self {
            current_bet,
            min_raise,
            last_aggressor: None,
            street,
            to_act,
        }
    }

    /// Открыть раунд: очередь – все активные места по кругу начиная со `start_seat`.
    /// Сфолдившие и all-in места пропускаются.
    pub fn open(
        table: &Table,
        street: Street,
        start_seat: SeatIndex,
        current_bet: Chips,
        min_raise: Chips,
    ) -> Self {
        let to_act = collect_occupied_seats_from(table, start_seat)
            .into_iter()
            .filter(|&s| table.player(s).is_some_and(|p| p.can_act()))
            .collect();
        Self::new(street, current_bet, min_raise, to_act)
    }

    /// Минимальная итоговая ставка для raise.
    pub fn min_raise_to(&self) -> Chips {
        self.current_bet + self.min_raise
    }

    /// Удалить seat из очереди to_act, если он там есть.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
    }

    /// Обновить состояние после повышения ставки и заново открыть торговлю
    /// для всех активных игроков после агрессора.
    fn on_raise(&mut self, table: &Table, seat: SeatIndex, new_bet: Chips) {
        let raise_size = new_bet.saturating_sub(self.current_bet);
        self.current_bet = new_bet;
        self.min_raise = self.min_raise.max(raise_size);
        self.last_aggressor = Some(seat);
        self.to_act = seats_after(table, seat)
            .into_iter()
            .filter(|&s| table.player(s).is_some_and(|p| p.can_act()))
            .collect();
    }

    /// Текущее состояние раунда.
    pub fn state(&self, table: &Table) -> RoundState {
        if table.live_count() <= 1 {
            return RoundState::HandDecidedByFold;
        }

        let active: Vec<_> = table.occupied().filter(|(_, p)| p.can_act()).collect();
        match active.as_slice() {
            [] => return RoundState::RoundComplete,
            // Единственному активному не с кем торговаться, если он уже уравнял.
            [(_, p)] if p.current_bet >= self.current_bet => return RoundState::RoundComplete,
            _ => {}
        }

        self.to_act
            .iter()
            .copied()
            .find(|&s| table.player(s).is_some_and(|p| p.can_act()))
            .map_or(RoundState::RoundComplete, RoundState::AwaitingAction)
    }

    /// Собрать запрос решения для места `seat`.
    pub fn request(&self, table: &Table, seat: SeatIndex) -> Result<ActionRequest, EngineError> {
        let player = table.player(seat).ok_or(EngineError::EmptySeat(seat))?;
        Ok(ActionRequest {
            seat,
            player_id: player.id,
            street: self.street,
            legal: legal_actions(player, self),
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            stack: player.stack,
            player_bet: player.current_bet,
            pot: table.total_pot(),
        })
    }

    /// Применить действие игрока.
    ///
    /// Недопустимое действие возвращает ошибку и ничего не меняет.
    pub fn apply(
        &mut self,
        table: &mut Table,
        seat: SeatIndex,
        action: Action,
    ) -> Result<ActionOutcome, EngineError> {
        if self.state(table) != RoundState::AwaitingAction(seat) {
            return Err(EngineError::PlayerCannotAct(seat));
        }
        {
            let player = table.player(seat).ok_or(EngineError::EmptySeat(seat))?;
            validate_action(seat, player, &action, self)?;
        }

        let current_bet_before = self.current_bet;
        let player = table.player_mut(seat).ok_or(EngineError::EmptySeat(seat))?;
        let mut outcome = ActionOutcome {
            paid: Chips::ZERO,
            reopened: false,
            auto_folded: false,
            all_in: false,
        };

        match action {
            Action::Fold => player.fold(),

            Action::Check => {}

            Action::Call => {
                let to_call = player.to_call(current_bet_before);
                if player.stack < to_call {
                    // Не хватает на call – фолд, в all-in насильно не переводим.
                    player.fold();
                    outcome.auto_folded = true;
                } else {
                    outcome.paid = player.commit(to_call);
                }
            }

            Action::Bet(amount) => {
                outcome.paid = player.commit(amount);
            }

            Action::Raise(total_bet) => {
                let diff = total_bet.saturating_sub(player.current_bet);
                outcome.paid = player.commit(diff);
            }

            Action::AllIn => {
                let stack = player.stack;
                outcome.paid = player.commit(stack);
            }
        }

        outcome.all_in = player.is_all_in();
        let new_bet = player.current_bet;

        if new_bet > current_bet_before {
            self.on_raise(table, seat, new_bet);
            outcome.reopened = true;
        } else {
            self.mark_acted(seat);
        }

        Ok(outcome)
    }
}

/// Провести раунд ставок до конца: спрашивать игроков по очереди, пока раунд
/// не завершится или не останется один игрок.
///
/// Отмена и недопустимые действия не меняют состояния – игрока спрашивают снова,
/// но не больше `max_prompts_per_turn` раз подряд.
pub fn run_betting_round<S, O>(
    table: &mut Table,
    betting: &mut BettingState,
    source: &mut S,
    observer: &mut O,
    history: &mut HandHistory,
) -> Result<RoundState, EngineError>
where
    S: ActionSource + ?Sized,
    O: TableObserver + ?Sized,
{
    let max_prompts = table.config.max_prompts_per_turn;

    loop {
        let seat = match betting.state(table) {
            RoundState::AwaitingAction(seat) => seat,
            done => {
                debug!(street = %betting.street, state = ?done, "раунд ставок завершён");
                return Ok(done);
            }
        };

        let mut prompts = 0u32;
        loop {
            if prompts >= max_prompts {
                warn!(seat, prompts, "источник действий не дал допустимого решения");
                return Err(EngineError::ActionSourceStalled { seat });
            }
            prompts += 1;

            let request = betting.request(table, seat)?;
            let action = match source.decide(&request) {
                Decision::Act(action) => action,
                Decision::Cancelled => {
                    debug!(seat, "решение отменено, спрашиваем снова");
                    record_event(
                        history,
                        observer,
                        table,
                        Some(&*betting),
                        HandEventKind::DecisionCancelled { seat },
                    );
                    continue;
                }
            };

            match betting.apply(table, seat, action) {
                Ok(outcome) => {
                    let (player_id, new_stack) = table
                        .player(seat)
                        .map(|p| (p.id, p.stack))
                        .ok_or(EngineError::EmptySeat(seat))?;
                    debug!(seat, %action, paid = outcome.paid.0, reopened = outcome.reopened, "действие принято");
                    record_event(
                        history,
                        observer,
                        table,
                        Some(&*betting),
                        HandEventKind::PlayerActed {
                            player_id,
                            seat,
                            action,
                            outcome,
                            new_stack,
                            pot_after: table.total_pot(),
                        },
                    );
                    break;
                }
                Err(err) if err.is_recoverable() => {
                    debug!(seat, %action, reason = %err, "действие отклонено");
                    source.rejected(&request, action, &err);
                    record_event(
                        history,
                        observer,
                        table,
                        Some(&*betting),
                        HandEventKind::ActionRejected {
                            seat,
                            action,
                            reason: err.to_string(),
                        },
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }
}
