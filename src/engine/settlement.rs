use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::chips::Chips;
use crate::domain::hand::HandRank;
use crate::domain::{SeatIndex, Table};
use crate::engine::errors::EngineError;
use crate::engine::positions::seats_after;

/// Вклад игрока в банк за всю раздачу.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contribution {
    pub seat: SeatIndex,
    /// Сумма по всем улицам.
    pub amount: Chips,
    /// Не сфолдил.
    pub live: bool,
    pub all_in: bool,
}

/// Банк: основной (index 0) или сайд-пот (1, 2, ... по порядку создания).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub index: usize,
    pub amount: Chips,
    /// Живые игроки, дотянувшиеся до уровня этого банка.
    pub eligible_seats: Vec<SeatIndex>,
    /// Кто сколько внёс именно в этот банк (включая сфолдивших).
    pub contributions: Vec<(SeatIndex, Chips)>,
}

impl Pot {
    pub fn is_main(&self) -> bool {
        self.index == 0
    }
}

/// Одна выплата из банка.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub pot_index: usize,
    pub seat: SeatIndex,
    pub amount: Chips,
    /// Возврат внесённого (в банке не осталось живых претендентов).
    pub refund: bool,
}

/// Итог расчёта банков раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settlement {
    pub pots: Vec<Pot>,
    pub payouts: Vec<Payout>,
}

impl Settlement {
    pub fn total_paid(&self) -> Chips {
        self.payouts.iter().map(|p| p.amount).sum()
    }

    /// Сколько получил игрок на месте `seat` из всех банков.
    pub fn won_by(&self, seat: SeatIndex) -> Chips {
        self.payouts
            .iter()
            .filter(|p| p.seat == seat && !p.refund)
            .map(|p| p.amount)
            .sum()
    }
}

/// Вклады всех игроков стола с ненулевой суммой.
pub fn contributions_from_table(table: &Table) -> Vec<Contribution> {
    table
        .occupied()
        .filter(|(_, p)| !p.committed.is_zero())
        .map(|(seat, p)| Contribution {
            seat,
            amount: p.committed,
            live: p.is_live(),
            all_in: p.is_all_in(),
        })
        .collect()
}

/// Разложить вклады на основной банк и сайд-поты по уровням all-in.
///
/// Уровень – минимальный остаток среди игроков в all-in, у которых ещё что-то
/// не собрано. Каждый вносит в банк `min(остаток, уровень)`. Если среди
/// оставшихся никого в all-in нет, весь остаток уходит одним банком.
pub fn build_pots(contributions: &[Contribution]) -> Result<Vec<Pot>, EngineError> {
    let mut remaining: Vec<(Contribution, Chips)> = contributions
        .iter()
        .filter(|c| !c.amount.is_zero())
        .map(|c| (*c, c.amount))
        .collect();

    let mut pots: Vec<Pot> = Vec::new();

    loop {
        let open: Vec<&(Contribution, Chips)> =
            remaining.iter().filter(|(_, left)| !left.is_zero()).collect();
        if open.is_empty() {
            break;
        }

        let tier = open
            .iter()
            .filter(|(c, _)| c.all_in)
            .map(|(_, left)| *left)
            .min();

        let mut pot = Pot {
            index: pots.len(),
            amount: Chips::ZERO,
            eligible_seats: Vec::new(),
            contributions: Vec::new(),
        };

        for (c, left) in remaining.iter_mut() {
            if left.is_zero() {
                continue;
            }
            let take = match tier {
                Some(tier) => (*left).min(tier),
                None => *left,
            };
            *left -= take;
            pot.amount += take;
            pot.contributions.push((c.seat, take));
            if c.live {
                pot.eligible_seats.push(c.seat);
            }
        }

        debug!(
            pot = pot.index,
            amount = pot.amount.0,
            eligible = ?pot.eligible_seats,
            "банк собран"
        );
        pots.push(pot);
    }

    let collected: Chips = pots.iter().map(|p| p.amount).sum();
    let wagered: Chips = contributions.iter().map(|c| c.amount).sum();
    if collected != wagered {
        return Err(EngineError::InvariantViolation(format!(
            "банки {collected} не равны сумме ставок {wagered}"
        )));
    }

    Ok(pots)
}

/// Раздать банки.
///
/// `ranks` – силы рук игроков, дошедших до шоудауна. Банк с единственным
/// живым претендентом отдаётся ему без сравнения. `odd_chip_order` задаёт,
/// кому по очереди достаются лишние фишки при дележе.
pub fn distribute(
    pots: &[Pot],
    ranks: &[(SeatIndex, HandRank)],
    odd_chip_order: &[SeatIndex],
) -> Result<Vec<Payout>, EngineError> {
    let mut payouts = Vec::new();

    for pot in pots {
        if pot.amount.is_zero() {
            continue;
        }

        if pot.eligible_seats.is_empty() {
            for &(seat, amount) in &pot.contributions {
                if !amount.is_zero() {
                    payouts.push(Payout {
                        pot_index: pot.index,
                        seat,
                        amount,
                        refund: true,
                    });
                }
            }
            continue;
        }

        let winners = pot_winners(pot, ranks)?;
        let mut ordered: Vec<SeatIndex> = odd_chip_order
            .iter()
            .copied()
            .filter(|s| winners.contains(s))
            .collect();
        // Места вне заданного порядка – в конец по возрастанию.
        for &s in &winners {
            if !ordered.contains(&s) {
                ordered.push(s);
            }
        }

        let n = ordered.len() as u64;
        let share = pot.amount.0 / n;
        let odd = pot.amount.0 % n;
        for (i, &seat) in ordered.iter().enumerate() {
            let extra = u64::from((i as u64) < odd);
            payouts.push(Payout {
                pot_index: pot.index,
                seat,
                amount: Chips(share + extra),
                refund: false,
            });
        }
    }

    let paid: Chips = payouts.iter().map(|p| p.amount).sum();
    let collected: Chips = pots.iter().map(|p| p.amount).sum();
    if paid != collected {
        return Err(EngineError::InvariantViolation(format!(
            "выплачено {paid}, а в банках {collected}"
        )));
    }

    Ok(payouts)
}

/// Победители одного банка (несколько – сплит).
fn pot_winners(pot: &Pot, ranks: &[(SeatIndex, HandRank)]) -> Result<Vec<SeatIndex>, EngineError> {
    if let [only] = pot.eligible_seats.as_slice() {
        return Ok(vec![*only]);
    }

    let mut scored = Vec::with_capacity(pot.eligible_seats.len());
    for &seat in &pot.eligible_seats {
        let rank = ranks
            .iter()
            .find(|(s, _)| *s == seat)
            .map(|(_, r)| *r)
            .ok_or_else(|| {
                EngineError::InvariantViolation(format!("нет силы руки для места {seat}"))
            })?;
        scored.push((seat, rank));
    }

    let best = scored
        .iter()
        .map(|(_, r)| *r)
        .max()
        .ok_or_else(|| EngineError::InvariantViolation("банк без претендентов".into()))?;

    Ok(scored
        .into_iter()
        .filter(|(_, r)| *r == best)
        .map(|(s, _)| s)
        .collect())
}

/// Рассчитать банки стола и зачислить выигрыши в стеки.
///
/// Силы рук берутся из `Player::showdown`. Лишние фишки сплита идут по часовой
/// стрелке начиная с первого места слева от кнопки.
pub fn settle(table: &mut Table) -> Result<Settlement, EngineError> {
    let contributions = contributions_from_table(table);
    let pots = build_pots(&contributions)?;

    let ranks: Vec<(SeatIndex, HandRank)> = table
        .occupied()
        .filter(|(_, p)| p.is_live())
        .filter_map(|(seat, p)| p.showdown.map(|r| (seat, r)))
        .collect();

    let odd_chip_order = match table.button {
        Some(button) => seats_after(table, button),
        None => table.occupied().map(|(s, _)| s).collect(),
    };

    let payouts = distribute(&pots, &ranks, &odd_chip_order)?;

    for payout in &payouts {
        let player = table
            .player_mut(payout.seat)
            .ok_or(EngineError::EmptySeat(payout.seat))?;
        player.stack += payout.amount;
        if !payout.refund {
            player.winnings += payout.amount;
        }
        info!(
            pot = payout.pot_index,
            seat = payout.seat,
            amount = payout.amount.0,
            refund = payout.refund,
            "выплата из банка"
        );
    }

    // Ставки разложены по банкам и выплачены.
    for p in table.seats.iter_mut().flatten() {
        p.current_bet = Chips::ZERO;
    }

    Ok(Settlement { pots, payouts })
}
