use std::time::Duration;

use chrono::{DateTime, Utc};
pub use futures_util::future::LocalBoxFuture;

/// Host services the client needs: a clock, a local task spawner and
/// cancellable timers.
///
/// A timer runs for as long as its [`Platform::Task`] handle is alive;
/// dropping the handle cancels it.
pub trait Platform {
    type Task;

    fn now(&self) -> DateTime<Utc>;

    /// Runs `task` to completion on the current thread without blocking it.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// Calls `tick` every `period` until the handle is dropped.
    fn repeat(&self, period: Duration, tick: Box<dyn FnMut()>) -> Self::Task;

    /// Calls `fire` once after `delay` unless the handle is dropped first.
    fn defer(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> Self::Task;
}
