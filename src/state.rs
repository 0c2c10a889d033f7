use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::ChatId;

/// Time-based throttle: an unforced run is due only once more than `window`
/// has passed since the last recorded run.
#[derive(Debug, Clone, PartialEq)]
pub struct Throttle {
    window: TimeDelta,
    last_run: DateTime<Utc>,
}

impl Throttle {
    /// Starts the window at `now`, so unforced runs right after construction
    /// are skipped.
    pub fn new(window: Duration, now: DateTime<Utc>) -> Self {
        Self {
            window: TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX),
            last_run: now,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>, force: bool) -> bool {
        force || now - self.last_run > self.window
    }

    pub fn record(&mut self, now: DateTime<Utc>) {
        self.last_run = now;
    }

    pub fn last_run(&self) -> DateTime<Utc> {
        self.last_run
    }
}

/// Mutable UI state owned by one [`crate::ChatClient`].
#[derive(Debug, Clone)]
pub struct ClientState {
    pub chat_list: Throttle,
    pub visitor_list: Throttle,
    pub message_list: Throttle,
    pub current_chat_id: Option<ChatId>,
}

impl ClientState {
    pub fn new(refresh_window: Duration, now: DateTime<Utc>) -> Self {
        Self {
            chat_list: Throttle::new(refresh_window, now),
            visitor_list: Throttle::new(refresh_window, now),
            message_list: Throttle::new(refresh_window, now),
            current_chat_id: None,
        }
    }

    pub fn is_open(&self, chat_id: &ChatId) -> bool {
        self.current_chat_id.as_ref() == Some(chat_id)
    }
}
