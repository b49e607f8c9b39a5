//! Покерный движок: раунды ставок, банки, раздача целиком, сессия.
//!
//! Точки входа:
//!   - `play_hand` – сыграть одну раздачу на столе;
//!   - `Session` – серия раздач до победителя;
//!   - `run_betting_round` / `BettingState` – одна улица торговли.

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod session;
pub mod settlement;
pub mod validation;

pub use actions::{Action, ActionKind, ActionOutcome, ActionRequest, Decision, LegalActions};
pub use betting::{run_betting_round, BettingState, RoundState};
pub use errors::EngineError;
pub use game_loop::{play_hand, HandResult};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use session::{Elimination, LeaderboardEntry, Session, SessionOutcome};
pub use settlement::{build_pots, distribute, settle, Contribution, Payout, Pot, Settlement};

/// Источник случайности для колоды. Реализации – в infra.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
