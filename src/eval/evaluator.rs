use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Suit};
use crate::domain::hand::HandRank;
use crate::engine::errors::EngineError;

use super::hand_rank::{HandCategory, TieBreak};
use super::lookup_tables::{detect_straight, rank_to_bit, straight_values, top_values, RankMask};

/// Итог оценки: сила руки и пять карт, которые её составляют.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evaluation {
    pub rank: HandRank,
    pub best_five: [Card; 5],
}

impl Evaluation {
    pub fn category(&self) -> HandCategory {
        self.rank.category()
    }
}

/// Силу руки игрока: hole + board.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Result<HandRank, EngineError> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate(&all_cards).map(|e| e.rank)
}

/// Оценить набор из 5+ карт (обычно 5–7).
///
/// Один проход подсчётов: количество по каждому значению и битовая маска
/// значений по каждой масти. Дальше категории проверяются от старшей к младшей.
/// Результат не зависит от порядка карт; дубликаты игнорируются.
pub fn evaluate(cards: &[Card]) -> Result<Evaluation, EngineError> {
    let distinct = distinct_cards(cards);
    if distinct.len() < 5 {
        return Err(EngineError::InsufficientCards(distinct.len()));
    }

    let (category, key, suit) = classify(&distinct);
    let best_five = collect_five(&distinct, category, &key, suit)?;

    Ok(Evaluation {
        rank: HandRank::new(category, key),
        best_five,
    })
}

fn distinct_cards(cards: &[Card]) -> Vec<Card> {
    let mut seen = 0u64;
    let mut out = Vec::with_capacity(cards.len());
    for card in cards {
        let bit = 1u64 << card.index();
        if seen & bit == 0 {
            seen |= bit;
            out.push(*card);
        }
    }
    out
}

fn classify(cards: &[Card]) -> (HandCategory, TieBreak, Option<Suit>) {
    let mut rank_counts = [0u8; 15]; // индексы 2..=14
    let mut suit_masks: [RankMask; 4] = [0; 4];
    let mut rank_mask: RankMask = 0;

    for card in cards {
        rank_counts[card.rank as usize] += 1;
        suit_masks[card.suit.index()] |= rank_to_bit(card.rank);
        rank_mask |= rank_to_bit(card.rank);
    }

    // Значения с не менее чем `n` копиями, по убыванию.
    let with_count = |n: u8| -> Vec<u8> {
        (2..=14u8).rev().filter(|&v| rank_counts[v as usize] >= n).collect()
    };
    // Старшие значения, не входящие в `used`.
    let kickers = |used: &[u8], n: usize| -> Vec<u8> {
        (2..=14u8)
            .rev()
            .filter(|&v| rank_counts[v as usize] > 0 && !used.contains(&v))
            .take(n)
            .collect()
    };

    let flush_suits: Vec<Suit> = Suit::ALL
        .iter()
        .copied()
        .filter(|s| suit_masks[s.index()].count_ones() >= 5)
        .collect();

    // Straight flush / royal flush.
    let best_straight_flush = flush_suits
        .iter()
        .filter_map(|&s| detect_straight(suit_masks[s.index()]).map(|high| (high, s)))
        .max_by_key(|(high, _)| *high);
    if let Some((high, suit)) = best_straight_flush {
        let category = if high == 14 {
            HandCategory::RoyalFlush
        } else {
            HandCategory::StraightFlush
        };
        return (category, TieBreak(straight_values(high)), Some(suit));
    }

    let quads = with_count(4);
    if let Some(&q) = quads.first() {
        let mut key = vec![q];
        key.extend(kickers(&[q], 1));
        return (HandCategory::FourOfAKind, TieBreak::from_values(&key), None);
    }

    let trips = with_count(3);
    if let Some(&t) = trips.first() {
        if let Some(&p) = with_count(2).iter().find(|&&v| v != t) {
            return (HandCategory::FullHouse, TieBreak::from_values(&[t, p]), None);
        }
    }

    let best_flush = flush_suits
        .iter()
        .map(|&s| (top_values(suit_masks[s.index()], 5), s))
        .max_by(|a, b| a.0.cmp(&b.0));
    if let Some((values, suit)) = best_flush {
        return (HandCategory::Flush, TieBreak::from_values(&values), Some(suit));
    }

    if let Some(high) = detect_straight(rank_mask) {
        return (HandCategory::Straight, TieBreak(straight_values(high)), None);
    }

    if let Some(&t) = trips.first() {
        let mut key = vec![t];
        key.extend(kickers(&[t], 2));
        return (HandCategory::ThreeOfAKind, TieBreak::from_values(&key), None);
    }

    // Пары считаются по всем картам игрока (hole + board) – пара только на борде
    // тоже пара игрока.
    let pairs = with_count(2);
    if pairs.len() >= 2 {
        let (p1, p2) = (pairs[0], pairs[1]);
        let mut key = vec![p1, p2];
        key.extend(kickers(&[p1, p2], 1));
        return (HandCategory::TwoPair, TieBreak::from_values(&key), None);
    }
    if let Some(&p) = pairs.first() {
        let mut key = vec![p];
        key.extend(kickers(&[p], 3));
        return (HandCategory::OnePair, TieBreak::from_values(&key), None);
    }

    (
        HandCategory::HighCard,
        TieBreak::from_values(&top_values(rank_mask, 5)),
        None,
    )
}

/// Выбрать пять карт под категорию и ключ.
fn collect_five(
    cards: &[Card],
    category: HandCategory,
    key: &TieBreak,
    suit: Option<Suit>,
) -> Result<[Card; 5], EngineError> {
    let mut picked: Vec<Card> = Vec::with_capacity(5);

    for (&size, value) in category.group_sizes().iter().zip(key.0.iter()) {
        // В wheel туз записан как 1.
        let value = if *value == 1 { 14 } else { *value };
        let group: Vec<Card> = cards
            .iter()
            .filter(|c| c.rank as u8 == value)
            .filter(|c| suit.map_or(true, |s| c.suit == s))
            .filter(|c| !picked.contains(c))
            .take(size)
            .copied()
            .collect();
        if group.len() != size {
            return Err(EngineError::InvariantViolation(format!(
                "не удалось собрать {category} из {} карт",
                cards.len()
            )));
        }
        picked.extend(group);
    }

    picked.try_into().map_err(|v: Vec<Card>| {
        EngineError::InvariantViolation(format!("лучшая рука из {} карт вместо 5", v.len()))
    })
}

