//! Контракты с внешним кодом.
//!
//! - source.rs – откуда движок берёт решения игроков;
//! - observer.rs – кому движок сообщает о каждом переходе;
//! - snapshot.rs – снимок стола только для чтения.

pub mod observer;
pub mod snapshot;
pub mod source;

pub use observer::{NullObserver, TableObserver};
pub use snapshot::{SeatSnapshot, TableSnapshot};
pub use source::{ActionSource, PassiveSource, ScriptedSource};
