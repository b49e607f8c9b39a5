use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::SeatIndex;
use crate::engine::actions::{Action, ActionKind, LegalActions};
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
/// Ничего не меняет.
pub fn validate_action(
    seat: SeatIndex,
    player: &Player,
    action: &Action,
    betting: &BettingState,
) -> Result<(), EngineError> {
    if !player.can_act() {
        return Err(EngineError::PlayerCannotAct(seat));
    }

    let stack = player.stack;
    let to_call = player.to_call(betting.current_bet);

    match *action {
        Action::Fold => Ok(()),

        Action::Check => {
            if to_call.is_zero() {
                Ok(())
            } else {
                Err(EngineError::CannotCheck)
            }
        }

        // Нехватка стека – не ошибка: движок превратит call в фолд.
        Action::Call => {
            if to_call.is_zero() {
                Err(EngineError::CannotCall)
            } else {
                Ok(())
            }
        }

        Action::Bet(amount) => {
            if !betting.current_bet.is_zero() {
                return Err(EngineError::BetNotAllowed);
            }
            if amount.is_zero() {
                return Err(EngineError::ZeroBet);
            }
            if amount > stack {
                return Err(EngineError::NotEnoughChips);
            }
            Ok(())
        }

        Action::Raise(total_bet) => {
            if betting.current_bet.is_zero() {
                // Когда нет ставки – это bet, а не raise.
                return Err(EngineError::RaiseNotAllowed);
            }
            let min_total = betting.min_raise_to();
            if total_bet < min_total {
                return Err(EngineError::RaiseTooSmall { min_total });
            }
            if total_bet.saturating_sub(player.current_bet) > stack {
                return Err(EngineError::NotEnoughChips);
            }
            Ok(())
        }

        Action::AllIn => {
            if stack.is_zero() {
                return Err(EngineError::NothingToCommit);
            }
            Ok(())
        }
    }
}

/// Набор допустимых действий для игрока.
pub fn legal_actions(player: &Player, betting: &BettingState) -> LegalActions {
    let stack = player.stack;
    let to_call = player.to_call(betting.current_bet);
    let max_total = player.current_bet + stack;
    let min_raise_to = if betting.current_bet.is_zero() {
        Chips(1)
    } else {
        betting.min_raise_to()
    };

    let mut kinds = vec![ActionKind::Fold];
    if !player.can_act() {
        return LegalActions {
            kinds: Vec::new(),
            to_call,
            min_raise_to,
            max_total,
        };
    }

    if to_call.is_zero() {
        kinds.push(ActionKind::Check);
    } else {
        kinds.push(ActionKind::Call);
    }
    if betting.current_bet.is_zero() && !stack.is_zero() {
        kinds.push(ActionKind::Bet);
    }
    if !betting.current_bet.is_zero() && max_total >= min_raise_to {
        kinds.push(ActionKind::Raise);
    }
    if !stack.is_zero() {
        kinds.push(ActionKind::AllIn);
    }

    LegalActions {
        kinds,
        to_call,
        min_raise_to,
        max_total,
    }
}
