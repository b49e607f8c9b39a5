//! Интеграционные тесты для доменной модели (crate::domain).

use holdem_engine::domain::*;
use holdem_engine::engine::EngineError;

/// Карта печатается и разбирается в коротком виде.
#[test]
fn card_text_form_roundtrip() {
    let card: Card = "Td".parse().unwrap();
    assert_eq!(card.rank, Rank::Ten);
    assert_eq!(card.suit, Suit::Diamonds);
    assert_eq!(card.to_string(), "Td");

    assert_eq!("ah".parse::<Card>().unwrap(), Card::new(Rank::Ace, Suit::Hearts));
    assert!("1h".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());
    assert!("Ax".parse::<Card>().is_err());
}

/// Числовые значения: 2..=14 для рангов, 1..=4 для мастей.
#[test]
fn card_from_numeric_values() {
    let ace = Card::from_values(14, 4).unwrap();
    assert_eq!(ace, Card::new(Rank::Ace, Suit::Spades));
    assert_eq!(ace.rank.value(), 14);
    assert_eq!(ace.suit.value(), 4);

    assert!(Card::from_values(1, 1).is_none());
    assert!(Card::from_values(15, 1).is_none());
    assert!(Card::from_values(2, 0).is_none());
    assert!(Card::from_values(2, 5).is_none());
}

#[test]
fn parse_cards_splits_on_whitespace() {
    let cards = parse_cards("Ah Kd  7c").unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[2], Card::new(Rank::Seven, Suit::Clubs));
    assert!(parse_cards("Ah Zz").is_err());
}

/// Колода: 52 разные карты, индексы покрывают 0..52.
#[test]
fn standard_deck_has_52_distinct_cards() {
    let deck = Deck::standard_52();
    assert_eq!(deck.len(), 52);

    let mut seen = [false; 52];
    for card in &deck.cards {
        assert!(!seen[card.index()], "дубликат {card}");
        seen[card.index()] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

/// draw снимает карты без возвращения, при нехватке – DeckExhausted и колода не меняется.
#[test]
fn deck_draw_without_replacement_and_exhaustion() {
    let mut deck = Deck::standard_52();
    let first = deck.draw(50).unwrap();
    assert_eq!(first.len(), 50);
    assert_eq!(deck.len(), 2);
    for card in &deck.cards {
        assert!(!first.contains(card));
    }

    let err = deck.draw(3).unwrap_err();
    assert_eq!(
        err,
        EngineError::DeckExhausted {
            requested: 3,
            remaining: 2
        }
    );
    assert_eq!(deck.len(), 2);

    deck.draw_one().unwrap();
    deck.draw_one().unwrap();
    assert!(deck.is_empty());
    assert!(deck.draw_one().is_err());
}

#[test]
fn deck_remove_known_cards() {
    let mut deck = Deck::standard_52();
    let known = parse_cards("Ah Kh").unwrap();
    deck.remove_cards(&known);
    assert_eq!(deck.len(), 50);
    assert!(!deck.cards.contains(&known[0]));
}

#[test]
fn chips_arithmetic_saturates() {
    let a = Chips(10);
    let b = Chips(25);
    assert_eq!(a + b, Chips(35));
    assert_eq!(a - b, Chips::ZERO);
    assert_eq!(b.checked_sub(a), Some(Chips(15)));
    assert_eq!(a.checked_sub(b), None);
    assert_eq!(format!("{b}"), "$25");

    let total: Chips = [a, b, Chips(5)].iter().sum();
    assert_eq!(total, Chips(40));
}

/// commit не берёт больше стека; пустой стек => all-in.
#[test]
fn player_commit_and_all_in() {
    let mut p = Player::new(1, "Alice", Chips(10));
    let paid = p.commit(Chips(4));
    assert_eq!(paid, Chips(4));
    assert_eq!(p.stack, Chips(6));
    assert_eq!(p.current_bet, Chips(4));
    assert_eq!(p.committed, Chips(4));
    assert!(p.can_act());
    assert!(p.chips_balanced());

    let paid = p.commit(Chips(100));
    assert_eq!(paid, Chips(6));
    assert!(p.is_all_in());
    assert!(p.is_live());
    assert!(!p.can_act());
    assert!(p.chips_balanced());
}

/// Поля раздачи сбрасываются, id и стек остаются.
#[test]
fn player_reset_for_hand() {
    let mut p = Player::new(7, "Bob", Chips(20));
    p.commit(Chips(5));
    p.fold();
    p.hole_cards = parse_cards("2c 3d").unwrap();

    p.reset_for_hand();
    assert_eq!(p.id, 7);
    assert_eq!(p.stack, Chips(15));
    assert_eq!(p.stack_at_start, Chips(15));
    assert_eq!(p.current_bet, Chips::ZERO);
    assert_eq!(p.committed, Chips::ZERO);
    assert_eq!(p.status, PlayerStatus::Active);
    assert!(p.hole_cards.is_empty());
}

#[test]
fn table_seating_rules() {
    let mut table = Table::new(TableConfig {
        max_seats: 3,
        ..TableConfig::default()
    });
    assert_eq!(table.seats.len(), 3);

    table.seat_player(1, Player::new(1, "A", Chips(10))).unwrap();
    assert_eq!(
        table.seat_player(1, Player::new(2, "B", Chips(10))),
        Err(EngineError::SeatTaken(1))
    );
    assert_eq!(
        table.seat_player(3, Player::new(3, "C", Chips(10))),
        Err(EngineError::InvalidSeat(3))
    );

    table.seat_player(2, Player::new(2, "B", Chips(10))).unwrap();
    assert_eq!(table.seated_count(), 2);
    assert_eq!(table.total_chips(), Chips(20));

    let removed = table.remove_player(1).unwrap();
    assert_eq!(removed.id, 1);
    assert!(table.is_seat_empty(1));
    // Индексы стабильны: игрок на месте 2 не сдвинулся.
    assert_eq!(table.player(2).map(|p| p.id), Some(2));
}

#[test]
fn street_progression() {
    assert_eq!(Street::Preflop.next(), Some(Street::Flop));
    assert_eq!(Street::River.next(), None);
    let dealt: usize = Street::ALL.iter().map(|s| s.cards_to_deal()).sum();
    assert_eq!(dealt, 5);
    assert_eq!(Street::Turn.to_string(), "turn");
}

/// JSON-конфиг: недостающие поля берутся по умолчанию, некорректные значения отклоняются.
#[test]
fn table_config_from_json() {
    let cfg = TableConfig::from_json_str(r#"{ "small_blind": 5, "big_blind": 10 }"#).unwrap();
    assert_eq!(cfg.small_blind, Chips(5));
    assert_eq!(cfg.big_blind, Chips(10));
    assert_eq!(cfg.max_seats, 10);
    assert_eq!(cfg.max_prompts_per_turn, 64);

    assert!(matches!(
        TableConfig::from_json_str(r#"{ "big_blind": 0 }"#),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!(matches!(
        TableConfig::from_json_str(r#"{ "small_blind": 3, "big_blind": 2 }"#),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!(matches!(
        TableConfig::from_json_str(r#"{ "max_seats": 11 }"#),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!(matches!(
        TableConfig::from_json_str("{ not json"),
        Err(EngineError::ConfigParse(_))
    ));
}
