//! Доменная модель покера: карты, колода, игроки, стол, улицы.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;

// Базовые идентификаторы. Выдаются явно владельцем контекста (см. infra::IdAllocator).
pub type PlayerId = u64;
pub type HandId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;
