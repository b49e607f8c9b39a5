//! Движок техасского холдема: колода, оценка рук, раунды ставок,
//! основной банк и сайд-поты.
//!
//! Библиотека не знает ни про экран, ни про ввод: решения приходят через
//! [`api::ActionSource`], а каждое изменение отдаётся в [`api::TableObserver`].

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
