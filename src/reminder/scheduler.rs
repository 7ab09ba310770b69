//! Background thread that polls the reminder collection.

use chrono::{DateTime, Utc};
use log::{debug, error, info};
use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::lifecycle::{DueTracker, TickOutcome};
use super::sink::NotificationSink;
use crate::model::ReminderFeed;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    /// Time between ticks.
    pub poll_interval: Duration,
    /// How far ahead a reminder counts as due soon.
    pub threshold: chrono::Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            threshold: chrono::Duration::hours(5),
        }
    }
}

struct Running {
    stop: Sender<()>,
    handle: JoinHandle<DueTracker>,
}

/// Periodically classifies every reminder and notifies the sink when one
/// enters its due-soon window.
///
/// The first tick runs as soon as the thread starts. Dropping the scheduler
/// stops it.
pub struct ReminderScheduler {
    feed: ReminderFeed,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    running: Option<Running>,
}

impl ReminderScheduler {
    pub fn new(feed: ReminderFeed, sink: Arc<dyn NotificationSink>, config: SchedulerConfig) -> Self {
        Self {
            feed,
            sink,
            clock: Arc::new(SystemClock),
            config,
            running: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Spawns the polling thread. Does nothing if already running.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn start(&mut self) -> io::Result<()> {
        if self.running.is_some() {
            return Ok(());
        }

        let (stop, stop_rx) = mpsc::channel::<()>();
        let feed = self.feed.clone();
        let sink = Arc::clone(&self.sink);
        let clock = Arc::clone(&self.clock);
        let config = self.config;

        let handle = thread::Builder::new()
            .name("reminder-scheduler".to_string())
            .spawn(move || {
                let mut tracker = DueTracker::new(config.threshold);
                loop {
                    run_tick(&mut tracker, &feed, clock.as_ref(), sink.as_ref());
                    match stop_rx.recv_timeout(config.poll_interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                tracker
            })?;

        info!(
            "reminder scheduler started (interval {:?}, threshold {}h)",
            self.config.poll_interval,
            self.config.threshold.num_hours()
        );
        self.running = Some(Running { stop, handle });
        Ok(())
    }

    /// Stops the polling thread and hides every notification it showed.
    ///
    /// Waits for an in-flight tick to finish. Safe to call more than once.
    pub fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        // the thread may already be gone; join reports that
        let _ = running.stop.send(());
        match running.handle.join() {
            Ok(mut tracker) => {
                for id in tracker.take_shown() {
                    self.sink.hide(id);
                }
            }
            Err(_) => error!("reminder scheduler thread panicked"),
        }
        info!("reminder scheduler stopped");
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_tick(
    tracker: &mut DueTracker,
    feed: &ReminderFeed,
    clock: &dyn Clock,
    sink: &dyn NotificationSink,
) {
    let reminders = feed.snapshot();
    let outcome = tracker.tick(clock.now(), &reminders);
    deliver(&outcome, sink);
}

/// Sends one tick's decisions to `sink`: hides first, then shows.
pub fn deliver(outcome: &TickOutcome, sink: &dyn NotificationSink) {
    for &id in &outcome.dismissed {
        debug!("reminder {id} removed, hiding notification");
        sink.hide(id);
    }
    for reminder in &outcome.due_soon {
        info!("reminder due soon: {reminder}");
        sink.show(reminder.id(), reminder.url(), reminder.display_note());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Reminder, Url};
    use crate::model::Model;
    use crate::reminder::sink::Notification;
    use crate::reminder::sink::testing::RecordingSink;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::time::Instant;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(now)))
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    fn fast_config() -> SchedulerConfig {
        SchedulerConfig {
            poll_interval: Duration::from_millis(10),
            threshold: chrono::Duration::hours(5),
        }
    }

    fn wait_until(mut condition: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !condition() {
            assert!(Instant::now() < deadline, "timed out waiting for scheduler");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn scheduler(model: &Model, sink: &Arc<RecordingSink>) -> ReminderScheduler {
        let sink: Arc<dyn NotificationSink> = sink.clone();
        ReminderScheduler::new(model.reminder_feed(), sink, fast_config())
            .with_clock(ManualClock::at(t0()))
    }

    #[test]
    fn notifies_once_for_due_soon_reminder() {
        let mut model = Model::new();
        let reminder = Reminder::new(
            Url::new("https://nusmods.com").unwrap(),
            "",
            t0() + chrono::Duration::hours(3),
        );
        let id = reminder.id();
        model.add_reminder(reminder);
        let sink = Arc::new(RecordingSink::default());
        let mut scheduler = scheduler(&model, &sink);

        scheduler.start().unwrap();
        wait_until(|| sink.shows() == 1);
        // let several more ticks pass
        thread::sleep(Duration::from_millis(60));
        scheduler.stop();

        assert_eq!(
            sink.calls(),
            vec![
                Notification::Show {
                    id,
                    url: Url::new("https://nusmods.com").unwrap(),
                    note: "Open:".to_string(),
                },
                Notification::Hide(id),
            ]
        );
    }

    #[test]
    fn pending_reminder_is_never_shown() {
        let mut model = Model::new();
        model.add_reminder(Reminder::new(
            Url::new("https://later.com").unwrap(),
            "",
            t0() + chrono::Duration::hours(8),
        ));
        let sink = Arc::new(RecordingSink::default());
        let mut scheduler = scheduler(&model, &sink);

        scheduler.start().unwrap();
        thread::sleep(Duration::from_millis(50));
        scheduler.stop();

        assert!(sink.calls().is_empty());
    }

    #[test]
    fn removing_reminder_hides_its_notification() {
        let mut model = Model::new();
        let reminder = Reminder::new(
            Url::new("https://nusmods.com").unwrap(),
            "",
            t0() + chrono::Duration::hours(1),
        );
        let id = reminder.id();
        model.add_reminder(reminder);
        let sink = Arc::new(RecordingSink::default());
        let mut scheduler = scheduler(&model, &sink);

        scheduler.start().unwrap();
        wait_until(|| sink.shows() == 1);
        model.remove_reminder(id).unwrap();
        wait_until(|| sink.calls().len() == 2);
        scheduler.stop();

        assert_eq!(sink.calls().last(), Some(&Notification::Hide(id)));
        assert_eq!(sink.calls().len(), 2);
    }

    #[test]
    fn reminder_added_while_running_is_picked_up() {
        let mut model = Model::new();
        let sink = Arc::new(RecordingSink::default());
        let mut scheduler = scheduler(&model, &sink);
        scheduler.start().unwrap();

        model.add_reminder(Reminder::new(
            Url::new("https://nusmods.com").unwrap(),
            "",
            t0() + chrono::Duration::hours(2),
        ));

        wait_until(|| sink.shows() == 1);
        scheduler.stop();
    }

    #[test]
    fn stop_is_idempotent_and_start_twice_is_harmless() {
        let model = Model::new();
        let sink = Arc::new(RecordingSink::default());
        let mut scheduler = scheduler(&model, &sink);

        scheduler.stop();
        scheduler.start().unwrap();
        scheduler.start().unwrap();
        assert!(scheduler.is_running());

        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());
    }

    #[test]
    fn drop_stops_and_hides() {
        let mut model = Model::new();
        let reminder = Reminder::new(
            Url::new("https://nusmods.com").unwrap(),
            "",
            t0() + chrono::Duration::hours(1),
        );
        let id = reminder.id();
        model.add_reminder(reminder);
        let sink = Arc::new(RecordingSink::default());

        {
            let mut scheduler = scheduler(&model, &sink);
            scheduler.start().unwrap();
            wait_until(|| sink.shows() == 1);
        }

        assert_eq!(sink.calls().last(), Some(&Notification::Hide(id)));
    }
}
