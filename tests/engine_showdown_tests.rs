//! Showdown tests: оценка рук на реальном борде и раздача банка по результату.

use holdem_engine::domain::card::parse_cards;
use holdem_engine::domain::{Chips, HandRank, Player, SeatIndex, Table, TableConfig};
use holdem_engine::engine::settlement::settle;
use holdem_engine::eval::{evaluate_best_hand, HandCategory};

/// Стол, где каждый игрок уже вложил `committed` и открыл карты `hole`.
fn showdown_table(button: SeatIndex, board: &str, players: &[(&str, u64, u64)]) -> Table {
    let mut table = Table::new(TableConfig::default());
    let board = parse_cards(board).unwrap();
    for (i, (hole, stack, committed)) in players.iter().enumerate() {
        let seat = i as SeatIndex;
        let mut p = Player::new(i as u64 + 1, format!("P{}", i + 1), Chips(*stack));
        p.commit(Chips(*committed));
        p.hole_cards = parse_cards(hole).unwrap();
        p.showdown = Some(evaluate_best_hand(&p.hole_cards, &board).unwrap());
        table.seat_player(seat, p).unwrap();
    }
    table.board = board;
    table.button = Some(button);
    table
}

fn rank(table: &Table, seat: SeatIndex) -> HandRank {
    table.player(seat).and_then(|p| p.showdown).unwrap()
}

/// Флеш на борде у обоих: ничья, банк делится, лишняя фишка – первому слева от кнопки.
#[test]
fn identical_board_flush_splits_pot() {
    let mut table = showdown_table(
        0,
        "Ah Kh 9h 7h 2h",
        &[("3c 4d", 20, 5), ("5c 6d", 20, 5), ("Qs Qd", 20, 1)],
    );
    // Третий игрок сфолдил после блайнда.
    table.player_mut(2).unwrap().fold();
    table.player_mut(2).unwrap().showdown = None;

    assert_eq!(rank(&table, 0), rank(&table, 1));
    assert_eq!(rank(&table, 0).category(), HandCategory::Flush);

    let settlement = settle(&mut table).unwrap();
    assert_eq!(settlement.total_paid(), Chips(11));
    // Кнопка на месте 0: порядок 1, 2, 0 – лишняя фишка месту 1.
    assert_eq!(settlement.won_by(1), Chips(6));
    assert_eq!(settlement.won_by(0), Chips(5));
    assert_eq!(table.player(1).unwrap().stack, Chips(21));
    assert_eq!(table.player(0).unwrap().stack, Chips(20));
}

/// Стрит-флеш против каре на одном борде.
#[test]
fn straight_flush_wins_against_quads() {
    let mut table = showdown_table(
        1,
        "9h Th Jh 9c 9d",
        &[("Qh Kh", 50, 50), ("9s 2c", 50, 50)],
    );
    assert_eq!(rank(&table, 0).category(), HandCategory::StraightFlush);
    assert_eq!(rank(&table, 1).category(), HandCategory::FourOfAKind);

    settle(&mut table).unwrap();
    assert_eq!(table.player(0).unwrap().stack, Chips(100));
    assert_eq!(table.player(1).unwrap().stack, Chips::ZERO);
}

/// Одинаковая пара, решает кикер с руки.
#[test]
fn kicker_decides_between_same_pair() {
    let mut table = showdown_table(
        0,
        "Kd Kc 8s 5h 2d",
        &[("Ah 3c", 30, 10), ("Qh Jc", 30, 10)],
    );
    assert_eq!(rank(&table, 0).category(), HandCategory::OnePair);
    assert!(rank(&table, 0) > rank(&table, 1));

    let settlement = settle(&mut table).unwrap();
    assert_eq!(settlement.won_by(0), Chips(20));
    assert_eq!(settlement.won_by(1), Chips::ZERO);
}

/// Борд играет за всех: кикеры с руки ниже борда – сплит.
#[test]
fn board_plays_for_everyone() {
    let mut table = showdown_table(
        1,
        "Ah Kd Qc Js 9h",
        &[("2c 3d", 30, 10), ("4c 5d", 30, 10), ("6c 7d", 30, 10)],
    );
    let settlement = settle(&mut table).unwrap();
    assert_eq!(settlement.payouts.len(), 3);
    assert!(settlement.payouts.iter().all(|p| p.amount == Chips(10)));
}

/// Короткий all-in с лучшей рукой забирает основной банк, сайд-пот – лучшему из остальных.
#[test]
fn all_in_best_hand_takes_only_main_pot() {
    let mut table = showdown_table(
        2,
        "2c 7d 9h Js 4c",
        &[("Ah Ad", 5, 5), ("Kh Kd", 40, 20), ("Qh Qd", 40, 20)],
    );
    let settlement = settle(&mut table).unwrap();

    assert_eq!(settlement.pots.len(), 2);
    assert_eq!(settlement.won_by(0), Chips(15));
    assert_eq!(settlement.won_by(1), Chips(30));
    assert_eq!(settlement.won_by(2), Chips::ZERO);
}
