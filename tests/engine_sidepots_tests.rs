//! Side pot / settlement tests.
//!
//! Здесь мы проверяем:
//! - формирование основного банка и сайд-потов по уровням all-in;
//! - состав eligible_seats (сфолдившие вносят, но не претендуют);
//! - распределение: лучший претендент каждого банка, сплит и лишние фишки;
//! - возврат банка без живых претендентов;
//! - закон сохранения фишек на случайных входах (proptest).

use holdem_engine::domain::{Chips, HandRank, Player, SeatIndex, Table, TableConfig};
use holdem_engine::engine::settlement::{
    build_pots, contributions_from_table, distribute, settle, Contribution, Pot,
};
use holdem_engine::eval::{HandCategory, TieBreak};
use proptest::prelude::*;

fn contrib(seat: SeatIndex, amount: u64, live: bool, all_in: bool) -> Contribution {
    Contribution {
        seat,
        amount: Chips(amount),
        live,
        all_in,
    }
}

/// Утилита: (amount, eligible_seats) из Pot.
fn pot_info(p: &Pot) -> (u64, Vec<SeatIndex>) {
    (p.amount.0, p.eligible_seats.clone())
}

fn high_card(top: u8) -> HandRank {
    HandRank::new(HandCategory::HighCard, TieBreak([top, 9, 7, 4, 2]))
}

/// Без all-in всё собирается в один банк.
#[test]
fn no_all_in_makes_single_pot() {
    let pots = build_pots(&[
        contrib(0, 20, true, false),
        contrib(1, 20, true, false),
        contrib(2, 5, false, false),
    ])
    .unwrap();

    assert_eq!(pots.len(), 1);
    assert!(pots[0].is_main());
    assert_eq!(pot_info(&pots[0]), (45, vec![0, 1]));
}

/// Пример: стеки $10/$5/$10, B all-in за $5.
/// Основной банк $15 на троих, сайд-пот $10 только для A и C.
#[test]
fn three_players_one_short_all_in() {
    let contributions = [
        contrib(0, 10, true, true),
        contrib(1, 5, true, true),
        contrib(2, 10, true, true),
    ];
    let pots = build_pots(&contributions).unwrap();

    assert_eq!(pots.len(), 2);
    assert_eq!(pot_info(&pots[0]), (15, vec![0, 1, 2]));
    assert_eq!(pot_info(&pots[1]), (10, vec![0, 2]));

    // C лучше всех: забирает оба банка.
    let ranks = [(0, high_card(10)), (1, high_card(12)), (2, high_card(14))];
    let payouts = distribute(&pots, &ranks, &[0, 1, 2]).unwrap();
    let c_total: u64 = payouts.iter().filter(|p| p.seat == 2).map(|p| p.amount.0).sum();
    assert_eq!(c_total, 25);

    // B лучше всех: только основной банк, сайд-пот – лучшему из A и C.
    let ranks = [(0, high_card(10)), (1, high_card(14)), (2, high_card(12))];
    let payouts = distribute(&pots, &ranks, &[0, 1, 2]).unwrap();
    let won = |seat| -> u64 {
        payouts
            .iter()
            .filter(|p| p.seat == seat)
            .map(|p| p.amount.0)
            .sum()
    };
    assert_eq!(won(1), 15);
    assert_eq!(won(2), 10);
    assert_eq!(won(0), 0);
}

/// 3 игрока all-in: 100, 200, 300 – три слоя.
#[test]
fn three_tiers_of_all_in() {
    let pots = build_pots(&[
        contrib(0, 100, true, true),
        contrib(1, 200, true, true),
        contrib(2, 300, true, true),
    ])
    .unwrap();

    assert_eq!(pots.len(), 3);
    assert_eq!(pot_info(&pots[0]), (300, vec![0, 1, 2]));
    assert_eq!(pot_info(&pots[1]), (200, vec![1, 2]));
    assert_eq!(pot_info(&pots[2]), (100, vec![2]));
    assert_eq!(pots.iter().map(|p| p.index).collect::<Vec<_>>(), vec![0, 1, 2]);
}

/// Сфолдивший вносит в банки своего уровня, но не претендует на них.
#[test]
fn folded_contributor_is_not_eligible() {
    let pots = build_pots(&[
        contrib(0, 10, false, false),
        contrib(1, 5, true, true),
        contrib(2, 10, true, false),
        contrib(3, 10, true, false),
    ])
    .unwrap();

    assert_eq!(pots.len(), 2);
    assert_eq!(pot_info(&pots[0]), (20, vec![1, 2, 3]));
    assert_eq!(pot_info(&pots[1]), (15, vec![2, 3]));
    assert_eq!(pots[1].contributions, vec![(0, Chips(5)), (2, Chips(5)), (3, Chips(5))]);
}

/// Игрок в all-in на меньшую сумму не получает больше банков, в которых участвовал,
/// даже с лучшей рукой.
#[test]
fn short_all_in_winner_is_capped() {
    let pots = build_pots(&[
        contrib(0, 4, true, true),
        contrib(1, 50, true, false),
        contrib(2, 50, true, false),
    ])
    .unwrap();
    let ranks = [(0, high_card(14)), (1, high_card(13)), (2, high_card(12))];
    let payouts = distribute(&pots, &ranks, &[0, 1, 2]).unwrap();

    let short: u64 = payouts.iter().filter(|p| p.seat == 0).map(|p| p.amount.0).sum();
    assert_eq!(short, 12);
    let second: u64 = payouts.iter().filter(|p| p.seat == 1).map(|p| p.amount.0).sum();
    assert_eq!(second, 92);
}

/// Сплит: лишняя фишка – первому победителю по часовой слева от кнопки.
#[test]
fn odd_chip_goes_to_first_winner_left_of_button() {
    let pots = build_pots(&[
        contrib(1, 5, true, false),
        contrib(3, 5, true, false),
        contrib(5, 5, true, false),
    ])
    .unwrap();
    let tie = high_card(14);
    let ranks = [(1, tie), (3, high_card(9)), (5, tie)];

    // Кнопка на месте 4: порядок 5, 0, 1, 2, 3.
    let payouts = distribute(&pots, &ranks, &[5, 0, 1, 2, 3]).unwrap();
    let amounts: Vec<(SeatIndex, u64)> = payouts.iter().map(|p| (p.seat, p.amount.0)).collect();
    assert_eq!(amounts, vec![(5, 8), (1, 7)]);
}

/// Банк без живых претендентов возвращается тем, кто его собрал.
#[test]
fn pot_without_live_contender_is_refunded() {
    let pots = build_pots(&[
        contrib(0, 5, true, true),
        contrib(1, 10, false, false),
        contrib(2, 10, false, false),
    ])
    .unwrap();
    assert_eq!(pot_info(&pots[0]), (15, vec![0]));
    assert_eq!(pot_info(&pots[1]), (10, vec![]));

    let payouts = distribute(&pots, &[], &[0, 1, 2]).unwrap();
    assert_eq!(payouts.len(), 3);
    assert!(payouts[0].seat == 0 && !payouts[0].refund && payouts[0].amount == Chips(15));
    assert!(payouts[1..].iter().all(|p| p.refund && p.amount == Chips(5)));
}

/// Без силы руки у одного из претендентов распределять нельзя.
#[test]
fn missing_rank_is_invariant_violation() {
    let pots = build_pots(&[contrib(0, 5, true, false), contrib(1, 5, true, false)]).unwrap();
    let err = distribute(&pots, &[(0, high_card(14))], &[0, 1]).unwrap_err();
    assert!(matches!(
        err,
        holdem_engine::engine::EngineError::InvariantViolation(_)
    ));
}

/// settle: вклады со стола, выплаты в стеки и winnings.
#[test]
fn settle_pays_into_stacks() {
    let mut table = Table::new(TableConfig::default());
    for (seat, stack) in [(0u8, 10u64), (1, 5), (2, 10)] {
        table
            .seat_player(seat, Player::new(seat as u64 + 1, format!("P{seat}"), Chips(stack)))
            .unwrap();
        let p = table.player_mut(seat).unwrap();
        let all = p.stack;
        p.commit(all);
    }
    table.button = Some(0);
    table.player_mut(0).unwrap().showdown = Some(high_card(10));
    table.player_mut(1).unwrap().showdown = Some(high_card(14));
    table.player_mut(2).unwrap().showdown = Some(high_card(12));

    assert_eq!(contributions_from_table(&table).len(), 3);
    let settlement = settle(&mut table).unwrap();

    assert_eq!(settlement.total_paid(), Chips(25));
    assert_eq!(settlement.won_by(1), Chips(15));
    assert_eq!(table.player(1).unwrap().stack, Chips(15));
    assert_eq!(table.player(2).unwrap().stack, Chips(10));
    assert_eq!(table.player(2).unwrap().winnings, Chips(10));
    assert_eq!(table.player(0).unwrap().stack, Chips::ZERO);
}

fn arb_contributions() -> impl Strategy<Value = Vec<Contribution>> {
    prop::collection::vec((0u64..200, any::<bool>(), any::<bool>()), 2..=9).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (amount, live, all_in))| Contribution {
                seat: i as SeatIndex,
                amount: Chips(amount),
                live,
                // Сфолдивший не может быть в all-in.
                all_in: live && all_in,
            })
            .collect()
    })
}

proptest! {
    /// Сумма банков равна сумме ставок, выплаты равны сумме банков.
    #[test]
    fn prop_chips_are_conserved(
        contributions in arb_contributions(),
        rank_seed in prop::collection::vec(0u8..5, 9),
    ) {
        let wagered: u64 = contributions.iter().map(|c| c.amount.0).sum();
        let pots = build_pots(&contributions).unwrap();
        let collected: u64 = pots.iter().map(|p| p.amount.0).sum();
        prop_assert_eq!(collected, wagered);

        for pot in &pots {
            for seat in &pot.eligible_seats {
                let c = contributions.iter().find(|c| c.seat == *seat).unwrap();
                prop_assert!(c.live);
            }
        }

        // Ранги с частыми совпадениями, чтобы проверять и сплиты.
        let ranks: Vec<(SeatIndex, HandRank)> = contributions
            .iter()
            .filter(|c| c.live)
            .map(|c| (c.seat, high_card(10 + rank_seed[c.seat as usize])))
            .collect();
        let order: Vec<SeatIndex> = contributions.iter().map(|c| c.seat).collect();
        let payouts = distribute(&pots, &ranks, &order).unwrap();
        let paid: u64 = payouts.iter().map(|p| p.amount.0).sum();
        prop_assert_eq!(paid, wagered);
    }
}
