//! Watch command handler.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use std::thread;

use super::load_model;
use crate::cli::WatchArgs;
use crate::reminder::{ConsoleSink, DueTracker, NotificationSink, SchedulerConfig, deliver};
use crate::storage::Storage;

/// Source of time and pacing for the watch loop.
pub(crate) trait WatchClock {
    fn now(&self) -> DateTime<Utc>;
    fn pause(&self);
}

pub fn handle_watch(args: &WatchArgs, storage: &dyn Storage, config: SchedulerConfig) -> Result<()> {
    struct RealClock(SchedulerConfig);
    impl WatchClock for RealClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
        fn pause(&self) {
            thread::sleep(self.0.poll_interval);
        }
    }

    watch_impl(args, storage, config, &RealClock(config), &ConsoleSink::new())
}

/// Polls the data file and notifies `sink` as reminders become due soon.
///
/// The file is reloaded on every poll so reminders added by other `mark`
/// invocations are picked up. Reminder ids are persisted, so tracking
/// survives the reload.
pub(crate) fn watch_impl<C: WatchClock>(
    args: &WatchArgs,
    storage: &dyn Storage,
    config: SchedulerConfig,
    clock: &C,
    sink: &dyn NotificationSink,
) -> Result<()> {
    let mut tracker = DueTracker::new(config.threshold);
    let mut polls = 0u32;
    info!("watching reminders");

    loop {
        let model = load_model(storage)?;
        let outcome = tracker.tick(clock.now(), &model.reminders());
        deliver(&outcome, sink);

        polls += 1;
        if args.ticks.is_some_and(|limit| polls >= limit) {
            break;
        }
        clock.pause();
    }

    for id in tracker.take_shown() {
        sink.hide(id);
    }
    Ok(())
}
