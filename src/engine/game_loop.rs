use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::{ActionSource, TableObserver};
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandSummary, PlayerHandResult, Street};
use crate::domain::{HandId, PlayerId, SeatIndex, Table};
use crate::engine::betting::{run_betting_round, BettingState, RoundState};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{record_event, HandEventKind, HandHistory};
use crate::engine::positions::{blind_seats, next_occupied_seat, seats_after};
use crate::engine::settlement::{settle, Settlement};
use crate::engine::RandomSource;
use crate::eval::{describe_hand, evaluate};

/// Итог одной раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResult {
    pub summary: HandSummary,
    pub history: HandHistory,
    pub settlement: Settlement,
    /// Стеки всех игроков после выплат.
    pub updated_stacks: Vec<(SeatIndex, PlayerId, Chips)>,
    /// Места игроков, которым не хватает фишек на большой блайнд.
    pub eliminated: Vec<SeatIndex>,
}

/// Сыграть одну раздачу целиком: блайнды, карманные карты, четыре улицы,
/// шоудаун и расчёт банков.
///
/// Работает на копии стола. Стол вызывающего меняется только при успехе:
/// любая фатальная ошибка оставляет его как был.
pub fn play_hand<R, S, O>(
    table: &mut Table,
    button: SeatIndex,
    hand_id: HandId,
    rng: &mut R,
    source: &mut S,
    observer: &mut O,
) -> Result<HandResult, EngineError>
where
    R: RandomSource,
    S: ActionSource + ?Sized,
    O: TableObserver + ?Sized,
{
    table.config.validate()?;
    if table.player(button).is_none() {
        return Err(EngineError::EmptySeat(button));
    }
    if let Some((seat, _)) = table.occupied().find(|(_, p)| p.stack.is_zero()) {
        return Err(EngineError::InvariantViolation(format!(
            "у игрока на месте {seat} нет фишек"
        )));
    }
    if table.seated_count() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    let mut work = table.clone();
    for p in work.seats.iter_mut().flatten() {
        p.reset_for_hand();
    }
    work.board.clear();
    work.button = Some(button);
    work.street = Street::Preflop;

    let chips_before = work.total_chips();
    let mut history = HandHistory::new();
    info!(hand_id, button, players = work.seated_count(), "новая раздача");
    record_event(
        &mut history,
        observer,
        &work,
        None,
        HandEventKind::HandStarted { hand_id, button },
    );

    let mut deck = Deck::shuffled(rng);

    let (sb_seat, bb_seat, current_bet) = post_blinds(&mut work, button, &mut history, observer)?;
    deal_hole_cards(&mut work, button, &mut deck, &mut history, observer)?;

    let big_blind = work.config.big_blind;
    for street in Street::ALL {
        if work.live_count() <= 1 {
            break;
        }

        if street != Street::Preflop {
            deal_board(&mut work, street, &mut deck, &mut history, observer)?;
        }
        work.street = street;

        let mut betting = if street == Street::Preflop {
            let start = next_occupied_seat(&work, bb_seat, false).unwrap_or(sb_seat);
            BettingState::open(&work, street, start, current_bet, big_blind)
        } else {
            let start = next_occupied_seat(&work, button, false).unwrap_or(button);
            BettingState::open(&work, street, start, Chips::ZERO, big_blind)
        };

        record_event(
            &mut history,
            observer,
            &work,
            Some(&betting),
            HandEventKind::StreetChanged { street },
        );

        let state = run_betting_round(&mut work, &mut betting, source, observer, &mut history)?;
        if state == RoundState::HandDecidedByFold {
            break;
        }
    }

    let went_to_showdown = work.live_count() >= 2;
    if went_to_showdown {
        showdown(&mut work, button, &mut history, observer)?;
    }

    let settlement = settle(&mut work)?;
    for payout in &settlement.payouts {
        let kind = if payout.refund {
            HandEventKind::PotRefunded {
                pot_index: payout.pot_index,
                seat: payout.seat,
                amount: payout.amount,
            }
        } else {
            let player_id = work
                .player(payout.seat)
                .map(|p| p.id)
                .ok_or(EngineError::EmptySeat(payout.seat))?;
            HandEventKind::PotAwarded {
                pot_index: payout.pot_index,
                seat: payout.seat,
                player_id,
                amount: payout.amount,
            }
        };
        record_event(&mut history, observer, &work, None, kind);
    }

    let chips_after: Chips = work.occupied().map(|(_, p)| p.stack).sum();
    if chips_after != chips_before {
        return Err(EngineError::InvariantViolation(format!(
            "фишек до раздачи {chips_before}, после {chips_after}"
        )));
    }

    let results = work
        .occupied()
        .map(|(seat, p)| PlayerHandResult {
            player_id: p.id,
            seat,
            rank: p.showdown,
            won: p.winnings,
            net: p.stack.0 as i64 - p.stack_at_start.0 as i64,
            is_winner: !p.winnings.is_zero(),
        })
        .collect();

    let summary = HandSummary {
        hand_id,
        street_reached: work.street,
        went_to_showdown,
        board: work.board.clone(),
        total_pot: work.total_pot(),
        results,
    };

    let updated_stacks = work.occupied().map(|(seat, p)| (seat, p.id, p.stack)).collect();
    let eliminated: Vec<SeatIndex> = work
        .occupied()
        .filter(|(_, p)| p.stack < big_blind)
        .map(|(seat, _)| seat)
        .collect();

    record_event(
        &mut history,
        observer,
        &work,
        None,
        HandEventKind::HandFinished { hand_id },
    );
    info!(
        hand_id,
        pot = summary.total_pot.0,
        showdown = went_to_showdown,
        eliminated = ?eliminated,
        "раздача завершена"
    );

    *table = work;

    Ok(HandResult {
        summary,
        history,
        settlement,
        updated_stacks,
        eliminated,
    })
}

/// Поставить блайнды. Возвращает (SB, BB, текущая ставка).
///
/// Если стека не хватает на блайнд – игрок ставит всё, что есть, а остальным
/// всё равно нужно уравнять полный большой блайнд.
fn post_blinds<O>(
    table: &mut Table,
    button: SeatIndex,
    history: &mut HandHistory,
    observer: &mut O,
) -> Result<(SeatIndex, SeatIndex, Chips), EngineError>
where
    O: TableObserver + ?Sized,
{
    let (sb_seat, bb_seat) = blind_seats(table, button).ok_or(EngineError::NotEnoughPlayers)?;
    let small = table.config.small_blind;
    let big = table.config.big_blind;

    let sb_paid = table
        .player_mut(sb_seat)
        .ok_or(EngineError::EmptySeat(sb_seat))?
        .commit(small);
    let bb_paid = table
        .player_mut(bb_seat)
        .ok_or(EngineError::EmptySeat(bb_seat))?
        .commit(big);

    debug!(sb_seat, sb = sb_paid.0, bb_seat, bb = bb_paid.0, "блайнды");
    record_event(
        history,
        observer,
        table,
        None,
        HandEventKind::BlindsPosted {
            small_blind: Some((sb_seat, sb_paid)),
            big_blind: Some((bb_seat, bb_paid)),
        },
    );

    Ok((sb_seat, bb_seat, big.max(sb_paid)))
}

/// Раздать по две карты, по кругу начиная слева от кнопки.
fn deal_hole_cards<O>(
    table: &mut Table,
    button: SeatIndex,
    deck: &mut Deck,
    history: &mut HandHistory,
    observer: &mut O,
) -> Result<(), EngineError>
where
    O: TableObserver + ?Sized,
{
    let order = seats_after(table, button);
    let order: Vec<SeatIndex> = order.into_iter().chain(std::iter::once(button)).collect();

    for _ in 0..2 {
        for &seat in &order {
            let card = deck.draw_one()?;
            table
                .player_mut(seat)
                .ok_or(EngineError::EmptySeat(seat))?
                .hole_cards
                .push(card);
        }
    }

    for &seat in &order {
        let cards = table
            .player(seat)
            .map(|p| p.hole_cards.clone())
            .ok_or(EngineError::EmptySeat(seat))?;
        record_event(
            history,
            observer,
            table,
            None,
            HandEventKind::HoleCardsDealt { seat, cards },
        );
    }
    Ok(())
}

/// Открыть общие карты улицы и сбросить ставки улицы.
fn deal_board<O>(
    table: &mut Table,
    street: Street,
    deck: &mut Deck,
    history: &mut HandHistory,
    observer: &mut O,
) -> Result<(), EngineError>
where
    O: TableObserver + ?Sized,
{
    let cards = deck.draw(street.cards_to_deal())?;
    table.board.extend_from_slice(&cards);
    for p in table.seats.iter_mut().flatten() {
        p.current_bet = Chips::ZERO;
    }

    debug!(%street, board = ?table.board, "общие карты");
    let board = table.board.clone();
    record_event(
        history,
        observer,
        table,
        None,
        HandEventKind::BoardDealt {
            street,
            cards,
            board,
        },
    );
    Ok(())
}

/// Оценить руки всех несфолдивших и открыть карты по кругу слева от кнопки.
fn showdown<O>(
    table: &mut Table,
    button: SeatIndex,
    history: &mut HandHistory,
    observer: &mut O,
) -> Result<(), EngineError>
where
    O: TableObserver + ?Sized,
{
    if table.board.len() != 5 {
        return Err(EngineError::InvariantViolation(format!(
            "шоудаун с бордом из {} карт",
            table.board.len()
        )));
    }

    let order: Vec<SeatIndex> = seats_after(table, button)
        .into_iter()
        .chain(std::iter::once(button))
        .collect();

    for seat in order {
        let board = table.board.clone();
        let Some(player) = table.player_mut(seat) else {
            continue;
        };
        if !player.is_live() {
            continue;
        }

        let mut cards = player.hole_cards.clone();
        cards.extend_from_slice(&board);
        let evaluation = evaluate(&cards)?;
        player.showdown = Some(evaluation.rank);

        let player_id = player.id;
        let hole_cards = player.hole_cards.clone();
        let label = describe_hand(evaluation.rank);
        debug!(seat, hand = %label, "вскрытие");
        record_event(
            history,
            observer,
            table,
            None,
            HandEventKind::ShowdownReveal {
                seat,
                player_id,
                hole_cards,
                best_five: evaluation.best_five.to_vec(),
                rank_value: evaluation.rank.0,
                label,
            },
        );
    }
    Ok(())
}
