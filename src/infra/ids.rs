use serde::{Deserialize, Serialize};

use crate::domain::{HandId, PlayerId};

/// Выдача ID на основе монотонных счётчиков.
///
/// Принадлежит владельцу контекста (сессии): никаких глобальных счётчиков,
/// две сессии выдают одинаковые последовательности независимо друг от друга.
/// ID не переиспользуются, даже если игрок выбыл.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdAllocator {
    next_player: PlayerId,
    next_hand: HandId,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Счётчики начинаются с 1.
    pub fn new() -> Self {
        Self {
            next_player: 1,
            next_hand: 1,
        }
    }

    #[inline]
    pub fn next_player_id(&mut self) -> PlayerId {
        let id = self.next_player;
        self.next_player += 1;
        id
    }

    #[inline]
    pub fn next_hand_id(&mut self) -> HandId {
        let id = self.next_hand;
        self.next_hand += 1;
        id
    }
}
