//! Инфраструктура вокруг движка:
//! - выдача ID владельцем контекста;
//! - RNG-реализации для колоды.

pub mod ids;
pub mod rng;

pub use ids::IdAllocator;
pub use rng::{AnyRng, DeterministicRng, SystemRng};
