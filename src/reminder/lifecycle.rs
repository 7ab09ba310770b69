//! Per-reminder lifecycle state and edge detection across ticks.

use chrono::{DateTime, Duration, Utc};
use log::warn;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::domain::{Reminder, ReminderId};

/// Where a reminder stands relative to now.
///
/// Ordered so that a later state compares greater; reminders only move
/// forward through `Pending -> DueSoon -> Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleState {
    /// Due time is at least the threshold away.
    Pending,
    /// Due time is less than the threshold away.
    DueSoon,
    /// Due time has passed.
    Expired,
}

/// A reminder that could not be evaluated this tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerFault {
    #[error("reminder {id}: due-soon window before {remind_time} is out of range")]
    WindowOutOfRange {
        id: ReminderId,
        remind_time: DateTime<Utc>,
    },
}

/// Classifies `reminder` at `now` against the look-ahead `threshold`.
///
/// # Errors
///
/// Returns `SchedulerFault::WindowOutOfRange` when the start of the due-soon
/// window (`remind_time - threshold`) is not a representable time.
pub fn classify(
    reminder: &Reminder,
    now: DateTime<Utc>,
    threshold: Duration,
) -> Result<LifecycleState, SchedulerFault> {
    let remind_time = reminder.remind_time();
    if now >= remind_time {
        return Ok(LifecycleState::Expired);
    }

    let window_start = remind_time.checked_sub_signed(threshold).ok_or(
        SchedulerFault::WindowOutOfRange {
            id: reminder.id(),
            remind_time,
        },
    )?;

    // remind_time - now >= threshold  <=>  now <= window_start
    if now <= window_start {
        Ok(LifecycleState::Pending)
    } else {
        Ok(LifecycleState::DueSoon)
    }
}

/// What one tick decided.
#[derive(Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// Reminders that entered `DueSoon` on this tick.
    pub due_soon: Vec<Reminder>,
    /// Shown reminders that are gone from the collection.
    pub dismissed: Vec<ReminderId>,
    pub faults: Vec<SchedulerFault>,
}

impl TickOutcome {
    pub fn is_quiet(&self) -> bool {
        self.due_soon.is_empty() && self.dismissed.is_empty()
    }
}

/// Remembers each reminder's last state so notifications fire on the
/// `DueSoon` edge only.
#[derive(Debug)]
pub struct DueTracker {
    threshold: Duration,
    states: HashMap<ReminderId, LifecycleState>,
    shown: HashSet<ReminderId>,
}

impl DueTracker {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            states: HashMap::new(),
            shown: HashSet::new(),
        }
    }

    /// Evaluates a snapshot of reminders at `now`.
    ///
    /// A reminder seen for the first time starts from its computed state; if
    /// that is already `DueSoon` it counts as entering the window. Tracked
    /// states never move backwards. Reminders missing from `reminders` stop
    /// being tracked. A reminder that faults keeps its previous state and is
    /// retried next tick.
    pub fn tick(&mut self, now: DateTime<Utc>, reminders: &[Reminder]) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        let live: HashSet<ReminderId> = reminders.iter().map(Reminder::id).collect();
        self.states.retain(|id, _| live.contains(id));
        outcome.dismissed = self
            .shown
            .iter()
            .filter(|id| !live.contains(id))
            .copied()
            .collect();
        self.shown.retain(|id| live.contains(id));

        for reminder in reminders {
            let computed = match classify(reminder, now, self.threshold) {
                Ok(state) => state,
                Err(fault) => {
                    warn!("skipping reminder this tick: {fault}");
                    outcome.faults.push(fault);
                    continue;
                }
            };

            let previous = self.states.get(&reminder.id()).copied();
            let next = previous.map_or(computed, |p| p.max(computed));
            let entered_window = next == LifecycleState::DueSoon
                && previous.is_none_or(|p| p == LifecycleState::Pending);

            if entered_window {
                self.shown.insert(reminder.id());
                outcome.due_soon.push(reminder.clone());
            }
            self.states.insert(reminder.id(), next);
        }

        outcome
    }

    pub fn state_of(&self, id: ReminderId) -> Option<LifecycleState> {
        self.states.get(&id).copied()
    }

    /// Returns and forgets every reminder whose notification was shown.
    pub fn take_shown(&mut self) -> Vec<ReminderId> {
        self.shown.drain().collect()
    }
}
