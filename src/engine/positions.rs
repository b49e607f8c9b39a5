use crate::domain::{SeatIndex, Table};

/// Найти следующее занятое место по кругу (включая/исключая start).
pub fn next_occupied_seat(table: &Table, start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    let max = table.seats.len();
    if max == 0 {
        return None;
    }

    let mut idx = start as usize % max;
    if !include_start {
        idx = (idx + 1) % max;
    }

    for _ in 0..max {
        if table.seats[idx].is_some() {
            return Some(idx as SeatIndex);
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Все занятые места по часовой стрелке, начиная с `start` (включительно).
pub fn collect_occupied_seats_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let max = table.seats.len();
    if max == 0 {
        return Vec::new();
    }

    (0..max)
        .map(|i| (start as usize + i) % max)
        .filter(|&idx| table.seats[idx].is_some())
        .map(|idx| idx as SeatIndex)
        .collect()
}

/// Занятые места по часовой стрелке сразу после `seat` (сам `seat` не входит).
pub fn seats_after(table: &Table, seat: SeatIndex) -> Vec<SeatIndex> {
    let max = table.seats.len();
    if max == 0 {
        return Vec::new();
    }
    let start = ((seat as usize + 1) % max) as SeatIndex;
    collect_occupied_seats_from(table, start)
        .into_iter()
        .filter(|&s| s != seat)
        .collect()
}

/// Места блайндов для кнопки `button`: (small, big).
///
/// Хедз-ап: кнопка ставит малый блайнд, второй игрок – большой.
pub fn blind_seats(table: &Table, button: SeatIndex) -> Option<(SeatIndex, SeatIndex)> {
    let order = collect_occupied_seats_from(table, button);
    match order.len() {
        0 | 1 => None,
        2 => Some((order[0], order[1])),
        _ => Some((order[1], order[2])),
    }
}

/// Следующая позиция кнопки:
/// - если есть текущая кнопка – следующее занятое место;
/// - если нет – первое занятое.
pub fn next_button(table: &Table) -> Option<SeatIndex> {
    match table.button {
        Some(button) => next_occupied_seat(table, button, false),
        None => next_occupied_seat(table, 0, true),
    }
}
