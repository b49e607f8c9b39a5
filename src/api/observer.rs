use crate::api::snapshot::TableSnapshot;
use crate::engine::hand_history::HandEvent;

/// Получатель событий раздачи (отрисовка, логи, реплей).
///
/// Вызывается после каждого перехода со снимком стола.
pub trait TableObserver {
    fn on_event(&mut self, _event: &HandEvent, _snapshot: &TableSnapshot) {}
}

/// Наблюдатель, который ничего не делает.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl TableObserver for NullObserver {}

impl<F> TableObserver for F
where
    F: FnMut(&HandEvent, &TableSnapshot),
{
    fn on_event(&mut self, event: &HandEvent, snapshot: &TableSnapshot) {
        self(event, snapshot)
    }
}
