use std::time::Duration;

use chrono::{DateTime, Utc};
use gloo_timers::callback::{Interval, Timeout};
use leptos::task::spawn_local;

use polling_chat::Platform;
use polling_chat::platform::LocalBoxFuture;

/// Browser event loop: `Date.now()`, `spawn_local` and `setInterval` /
/// `setTimeout` through gloo.
#[derive(Clone, Copy, Default)]
pub struct BrowserPlatform;

/// A live browser timer, held only to keep it running. Dropping it clears
/// the interval or timeout.
pub enum TimerTask {
    Interval { _interval: Interval },
    Timeout { _timeout: Timeout },
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl Platform for BrowserPlatform {
    type Task = TimerTask;

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        spawn_local(task);
    }

    fn repeat(&self, period: Duration, mut tick: Box<dyn FnMut()>) -> TimerTask {
        TimerTask::Interval { _interval: Interval::new(millis(period), move || tick()) }
    }

    fn defer(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> TimerTask {
        TimerTask::Timeout { _timeout: Timeout::new(millis(delay), fire) }
    }
}
