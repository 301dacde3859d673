//! Deferred and periodic callbacks, expressed as data.
//!
//! The scheduler never calls back into game code. `poll` hands back the
//! timers that came due and the engine dispatches on their kind, so a
//! cancelled timer can never reach a despawned entity.

use hecs::Entity;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Forces the level to advance.
    LevelDeadline { level: u8 },
    /// The UFO takes a shot at the ship.
    UfoFire { ufo: Entity },
}

impl TimerKind {
    /// The entity this timer acts on, if any.
    pub fn entity(&self) -> Option<Entity> {
        match self {
            TimerKind::LevelDeadline { .. } => None,
            TimerKind::UfoFire { ufo } => Some(*ufo),
        }
    }
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    due_tick: u64,
    /// Repeat period; `None` for one-shot timers.
    period_ticks: Option<u64>,
}

/// Tick-based timer queue.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire once, `delay_ticks` after `now`.
    pub fn schedule_once(&mut self, kind: TimerKind, now: u64, delay_ticks: u64) -> TimerId {
        self.insert(kind, now.saturating_add(delay_ticks), None)
    }

    /// Fire every `period_ticks`, first at `now + period_ticks`.
    pub fn schedule_repeating(&mut self, kind: TimerKind, now: u64, period_ticks: u64) -> TimerId {
        let period = period_ticks.max(1);
        self.insert(kind, now.saturating_add(period), Some(period))
    }

    fn insert(&mut self, kind: TimerKind, due_tick: u64, period_ticks: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.timers.push(Timer {
            id,
            kind,
            due_tick,
            period_ticks,
        });
        id
    }

    /// Cancel a timer. Returns false if it had already fired or been cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every timer acting on `entity`. Returns how many were removed.
    pub fn cancel_for_entity(&mut self, entity: Entity) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.kind.entity() != Some(entity));
        before - self.timers.len()
    }

    /// Cancel every timer whose kind matches the predicate.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&TimerKind) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| !pred(&t.kind));
        before - self.timers.len()
    }

    /// Drop all timers.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Collect every timer due at or before `now`, ordered by due tick then
    /// creation. One-shot timers are removed; repeating timers are re-armed.
    pub fn poll(&mut self, now: u64) -> Vec<(TimerId, TimerKind)> {
        let mut due: Vec<(u64, TimerId, TimerKind)> = Vec::new();

        self.timers.retain_mut(|t| {
            if t.due_tick > now {
                return true;
            }
            due.push((t.due_tick, t.id, t.kind));
            match t.period_ticks {
                Some(period) => {
                    // Skip missed periods rather than firing a burst.
                    while t.due_tick <= now && t.due_tick < u64::MAX {
                        t.due_tick = t.due_tick.saturating_add(period);
                    }
                    true
                }
                None => false,
            }
        });

        due.sort_by_key(|&(tick, id, _)| (tick, id));
        due.into_iter().map(|(_, id, kind)| (id, kind)).collect()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Ticks until the timer fires, or `None` if it is not scheduled.
    pub fn remaining_ticks(&self, id: TimerId, now: u64) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.due_tick.saturating_sub(now))
    }

    /// Number of scheduled timers matching the predicate.
    pub fn count_where(&self, mut pred: impl FnMut(&TimerKind) -> bool) -> usize {
        self.timers.iter().filter(|t| pred(&t.kind)).count()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
