use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Колода карт. В домене – просто упорядоченный список оставшихся карт.
/// Случайность даёт RNG из infra: колода перемешивается один раз при создании,
/// а `draw` снимает карты сверху, что равносильно выбору без возвращения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Deck { cards }
    }

    /// Новая колода на раздачу, уже перемешанная.
    pub fn shuffled<R: RandomSource>(rng: &mut R) -> Self {
        let mut deck = Self::standard_52();
        rng.shuffle(&mut deck.cards);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять n карт. Если карт не хватает – ошибка, колода не меняется.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if n > self.cards.len() {
            return Err(EngineError::DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let split_at = self.cards.len() - n;
        let mut taken = self.cards.split_off(split_at);
        taken.reverse();
        Ok(taken)
    }

    /// Взять одну карту сверху колоды.
    pub fn draw_one(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::DeckExhausted {
            requested: 1,
            remaining: 0,
        })
    }

    /// Убрать из колоды уже известные карты (сценарии и тесты с заданным бордом).
    pub fn remove_cards(&mut self, to_remove: &[Card]) {
        self.cards.retain(|c| !to_remove.contains(c));
    }
}
