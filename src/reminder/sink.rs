//! Where due-soon notifications go.

use log::{debug, info};
use std::collections::HashSet;
use std::io::Write;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, PoisonError};

use crate::domain::{ReminderId, Url};

/// Displays reminder notifications.
///
/// Called from the scheduler thread. Both calls are idempotent per id:
/// showing an id that is already visible, or hiding one that is not, does
/// nothing.
pub trait NotificationSink: Send + Sync {
    fn show(&self, id: ReminderId, url: &Url, note: &str);
    fn hide(&self, id: ReminderId);
}

/// A notification request, as delivered by [`ChannelSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Show { id: ReminderId, url: Url, note: String },
    Hide(ReminderId),
}

impl Notification {
    pub fn id(&self) -> ReminderId {
        match self {
            Self::Show { id, .. } | Self::Hide(id) => *id,
        }
    }
}

/// Ids currently on screen.
#[derive(Debug, Default)]
struct Visible(Mutex<HashSet<ReminderId>>);

impl Visible {
    /// Returns `true` if `id` was not already visible.
    fn insert(&self, id: ReminderId) -> bool {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id)
    }

    /// Returns `true` if `id` was visible.
    fn remove(&self, id: ReminderId) -> bool {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }
}

/// Forwards notifications to the thread that owns the matching receiver.
///
/// The interactive shell drains the receiver while it waits for input, so
/// the scheduler thread never writes to the terminal itself.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Sender<Notification>,
    visible: Visible,
}

impl ChannelSink {
    pub fn new() -> (Self, Receiver<Notification>) {
        let (tx, rx) = mpsc::channel();
        let sink = Self {
            tx,
            visible: Visible::default(),
        };
        (sink, rx)
    }

    fn post(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            debug!("notification receiver dropped");
        }
    }
}

impl NotificationSink for ChannelSink {
    fn show(&self, id: ReminderId, url: &Url, note: &str) {
        if self.visible.insert(id) {
            self.post(Notification::Show {
                id,
                url: url.clone(),
                note: note.to_string(),
            });
        }
    }

    fn hide(&self, id: ReminderId) {
        if self.visible.remove(id) {
            self.post(Notification::Hide(id));
        }
    }
}

/// Prints notifications to stdout. Used by `mark watch`.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    visible: Visible,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationSink for ConsoleSink {
    fn show(&self, id: ReminderId, url: &Url, note: &str) {
        if self.visible.insert(id) {
            info!("showing reminder {id}");
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "Reminder: {note} {url}");
            let _ = stdout.flush();
        }
    }

    fn hide(&self, id: ReminderId) {
        if self.visible.remove(id) {
            info!("dismissed reminder {id}");
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn url() -> Url {
        Url::new("https://nusmods.com").unwrap()
    }

    #[test]
    fn channel_sink_delivers_show_then_hide() {
        let (sink, rx) = ChannelSink::new();
        let id = ReminderId::new();

        sink.show(id, &url(), "Open:");
        sink.hide(id);

        let received: Vec<Notification> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                Notification::Show {
                    id,
                    url: url(),
                    note: "Open:".to_string(),
                },
                Notification::Hide(id),
            ]
        );
    }

    #[test]
    fn channel_sink_is_idempotent_per_id() {
        let (sink, rx) = ChannelSink::new();
        let id = ReminderId::new();

        sink.hide(id);
        sink.show(id, &url(), "Open:");
        sink.show(id, &url(), "Open:");
        sink.hide(id);
        sink.hide(id);

        let ids: Vec<ReminderId> = rx.try_iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec![id, id]);
    }

    #[test]
    fn channel_sink_is_shared_across_threads() {
        let (sink, rx) = ChannelSink::new();
        let sink: std::sync::Arc<dyn NotificationSink> = std::sync::Arc::new(sink);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sink = std::sync::Arc::clone(&sink);
                std::thread::spawn(move || sink.show(ReminderId::new(), &url(), "Open:"))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(rx.try_iter().count(), 4);
    }

    #[test]
    fn channel_sink_survives_dropped_receiver() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.show(ReminderId::new(), &url(), "Open:");
    }

    #[test]
    fn console_sink_ignores_unknown_hide() {
        let sink = ConsoleSink::new();
        sink.hide(ReminderId::new());
        assert!(sink.visible.0.lock().unwrap().is_empty());
    }
}
