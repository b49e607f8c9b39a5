use std::collections::VecDeque;

use crate::domain::SeatIndex;
use crate::engine::actions::{Action, ActionKind, ActionRequest, Decision};
use crate::engine::errors::EngineError;

/// Источник решений игроков: человек, бот или заранее записанный сценарий.
///
/// Движок спрашивает по одному месту за раз и ждёт ответа.
pub trait ActionSource {
    /// Вернуть действие или `Decision::Cancelled` (спросить ещё раз).
    fn decide(&mut self, request: &ActionRequest) -> Decision;

    /// Действие отклонено с причиной `reason`. После этого место спросят снова.
    fn rejected(&mut self, _request: &ActionRequest, _action: Action, _reason: &EngineError) {}
}

impl<F> ActionSource for F
where
    F: FnMut(&ActionRequest) -> Decision,
{
    fn decide(&mut self, request: &ActionRequest) -> Decision {
        self(request)
    }
}

/// Пассивный бот: check, если можно, иначе call.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveSource;

impl PassiveSource {
    pub fn choose(request: &ActionRequest) -> Action {
        if request.legal.allows(ActionKind::Check) {
            Action::Check
        } else if request.legal.allows(ActionKind::Call) {
            Action::Call
        } else {
            Action::Fold
        }
    }
}

impl ActionSource for PassiveSource {
    fn decide(&mut self, request: &ActionRequest) -> Decision {
        Decision::Act(Self::choose(request))
    }
}

/// Сценарий: решения выдаются строго по очереди, независимо от места.
///
/// Когда сценарий закончился – либо пассивная игра, либо отмена
/// (тогда раунд упрётся в лимит переспросов).
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<Decision>,
    passive_when_exhausted: bool,
    /// Отклонённые действия: (место, действие, причина).
    pub rejections: Vec<(SeatIndex, Action, EngineError)>,
    /// Сколько раз источник спросили.
    pub prompts: usize,
}

impl ScriptedSource {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self::from_decisions(actions.into_iter().map(Decision::Act))
    }

    pub fn from_decisions(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            script: decisions.into_iter().collect(),
            passive_when_exhausted: false,
            rejections: Vec::new(),
            prompts: 0,
        }
    }

    /// После конца сценария играть пассивно.
    pub fn then_passive(mut self) -> Self {
        self.passive_when_exhausted = true;
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }
}

impl ActionSource for ScriptedSource {
    fn decide(&mut self, request: &ActionRequest) -> Decision {
        self.prompts += 1;
        match self.script.pop_front() {
            Some(decision) => decision,
            None if self.passive_when_exhausted => Decision::Act(PassiveSource::choose(request)),
            None => Decision::Cancelled,
        }
    }

    fn rejected(&mut self, request: &ActionRequest, action: Action, reason: &EngineError) {
        self.rejections.push((request.seat, action, reason.clone()));
    }
}
