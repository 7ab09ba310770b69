//! Reminder scheduling and notification.
//!
//! [`ReminderScheduler`] runs on its own thread, reading the model's
//! reminders through a [`ReminderFeed`](crate::model::ReminderFeed) snapshot
//! on every tick. [`DueTracker`] decides which reminders just entered their
//! due-soon window and a [`NotificationSink`] displays them.

mod lifecycle;
mod scheduler;
mod sink;

pub use lifecycle::{DueTracker, LifecycleState, SchedulerFault, TickOutcome, classify};
pub use scheduler::{Clock, ReminderScheduler, SchedulerConfig, SystemClock, deliver};
pub use sink::{ChannelSink, ConsoleSink, Notification, NotificationSink};

#[cfg(test)]
pub(crate) use sink::testing::RecordingSink;
