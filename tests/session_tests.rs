//! Тесты сессии: рассадка, ID, ротация кнопки, выбывание и таблица лидеров.

use std::collections::HashSet;

use holdem_engine::api::{NullObserver, PassiveSource, ScriptedSource};
use holdem_engine::domain::{Chips, TableConfig};
use holdem_engine::engine::{Action, EngineError, Session};
use holdem_engine::infra::DeterministicRng;

fn session(seed: u64, stacks: &[u64]) -> Session<DeterministicRng> {
    let mut session = Session::new(TableConfig::default(), DeterministicRng::from_seed(seed)).unwrap();
    for (i, &stack) in stacks.iter().enumerate() {
        session.add_player(format!("P{}", i + 1), Chips(stack)).unwrap();
    }
    session
}

#[test]
fn player_ids_start_at_one_and_are_unique() {
    let s = session(1, &[10, 10, 10, 10]);
    let ids: Vec<u64> = s.table().occupied().map(|(_, p)| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 4);
}

#[test]
fn seating_errors() {
    let config = TableConfig {
        max_seats: 2,
        ..TableConfig::default()
    };
    let mut s = Session::new(config, DeterministicRng::from_seed(1)).unwrap();
    s.add_player("A", Chips(10)).unwrap();
    assert_eq!(s.seat_player_at(0, "B", Chips(10)), Err(EngineError::SeatTaken(0)));
    assert_eq!(s.seat_player_at(7, "B", Chips(10)), Err(EngineError::InvalidSeat(7)));

    // Неудачная посадка не тратит ID.
    assert_eq!(s.add_player("B", Chips(10)), Ok((1, 2)));
    assert_eq!(s.add_player("C", Chips(10)), Err(EngineError::TableFull));
}

#[test]
fn invalid_config_is_rejected() {
    let config = TableConfig {
        big_blind: Chips(1),
        small_blind: Chips(2),
        ..TableConfig::default()
    };
    assert!(matches!(
        Session::new(config, DeterministicRng::from_seed(1)),
        Err(EngineError::InvalidConfig(_))
    ));
}

#[test]
fn single_player_cannot_start_a_hand() {
    let mut s = session(1, &[10]);
    assert_eq!(
        s.play_next_hand(&mut PassiveSource, &mut NullObserver).unwrap_err(),
        EngineError::NotEnoughPlayers
    );
    assert_eq!(s.hands_played(), 0);
}

#[test]
fn button_rotates_between_hands() {
    let mut s = session(3, &[50, 50, 50]);
    s.play_next_hand(&mut PassiveSource, &mut NullObserver).unwrap();
    assert_eq!(s.table().button, Some(0));
    s.play_next_hand(&mut PassiveSource, &mut NullObserver).unwrap();
    assert_eq!(s.table().button, Some(1));
    assert_eq!(s.hands_played(), 2);
}

#[test]
fn hand_ids_increase_per_hand() {
    let mut s = session(3, &[50, 50]);
    let first = s.play_next_hand(&mut PassiveSource, &mut NullObserver).unwrap();
    let second = s.play_next_hand(&mut PassiveSource, &mut NullObserver).unwrap();
    assert_eq!(first.summary.hand_id, 1);
    assert_eq!(second.summary.hand_id, 2);
}

/// Фолд до BB раз за разом: фишки перетекают, игроки выбывают, места освобождаются.
#[test]
fn busted_players_leave_their_seats() {
    let mut s = session(5, &[2, 10]);
    // Хедз-ап, кнопка 0 ставит SB и фолдит: стек 1 < BB – выбывает.
    let mut source = ScriptedSource::new([Action::Fold]);
    let result = s.play_next_hand(&mut source, &mut NullObserver).unwrap();

    assert_eq!(result.eliminated, vec![0]);
    assert!(s.table().seats[0].is_none());
    assert!(s.is_finished());
    assert_eq!(s.winner().map(|p| p.id), Some(2));
    assert_eq!(s.eliminated().len(), 1);
    assert_eq!(s.eliminated()[0].after_hand, 1);
    assert_eq!(s.eliminated()[0].stack, Chips(1));
}

#[test]
fn session_plays_until_winner_or_limit() {
    let mut s = session(17, &[6, 8, 10, 12]);
    let total_before = 36;

    let outcome = s
        .play_until_winner(&mut PassiveSource, &mut NullObserver, 500)
        .unwrap();
    assert!(outcome.winner.is_some() || outcome.hands_played == 500);
    if let Some(id) = outcome.winner {
        assert_eq!(s.winner().map(|p| p.id), Some(id));
    }

    // Фишки сохраняются: у сидящих плюс то, с чем ушли выбывшие.
    let seated: u64 = s.table().occupied().map(|(_, p)| p.stack.0).sum();
    let gone: u64 = s.eliminated().iter().map(|e| e.stack.0).sum();
    assert_eq!(seated + gone, total_before);

    let board = s.leaderboard();
    assert_eq!(board.len(), 4);
    let seated_rows: Vec<_> = board.iter().filter(|e| e.seat.is_some()).collect();
    assert!(seated_rows.windows(2).all(|w| w[0].stack >= w[1].stack));
    // Сидящие всегда выше выбывших.
    let first_gone = board.iter().position(|e| e.seat.is_none()).unwrap_or(board.len());
    assert!(board[first_gone..].iter().all(|e| e.seat.is_none()));
}

#[test]
fn same_seed_gives_same_session() {
    let mut a = session(77, &[10, 10, 10]);
    let mut b = session(77, &[10, 10, 10]);
    let oa = a.play_until_winner(&mut PassiveSource, &mut NullObserver, 50).unwrap();
    let ob = b.play_until_winner(&mut PassiveSource, &mut NullObserver, 50).unwrap();

    assert_eq!(oa, ob);
    assert_eq!(a.leaderboard(), b.leaderboard());
    assert_eq!(a.table(), b.table());
}

/// Ошибка в раздаче не меняет стол сессии и не увеличивает счётчик.
#[test]
fn failed_hand_keeps_session_state() {
    let mut s = session(2, &[10, 10, 10]);
    let before = s.table().clone();
    let mut stalled = ScriptedSource::new(Vec::<Action>::new());

    let err = s.play_next_hand(&mut stalled, &mut NullObserver).unwrap_err();
    assert!(matches!(err, EngineError::ActionSourceStalled { .. }));
    assert_eq!(s.table(), &before);
    assert_eq!(s.hands_played(), 0);
}
