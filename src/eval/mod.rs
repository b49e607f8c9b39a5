//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate(cards) -> Evaluation` – любая выборка из 5+ карт;
//!   `evaluate_best_hand(hole, board) -> HandRank`.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate, evaluate_best_hand, Evaluation};
pub use hand_rank::{describe_hand, HandCategory, TieBreak};
