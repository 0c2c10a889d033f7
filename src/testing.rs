//! In-memory stand-ins for the transport, the page and the host timers.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use futures_util::future::LocalBoxFuture;

use crate::api::ChatApi;
use crate::errors::ClientError;
use crate::models::{
    Chat, ChatId, CreatedChat, CreatedMessage, Message, NewChat, NewMessage, Visitor,
};
use crate::platform::Platform;
use crate::view::{ChatRow, ChatView, MessageRow, Screen, VisitorRow};

// ── API ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListChats,
    CreateChat(String),
    ListVisitors,
    ListMessages(ChatId),
    SendMessage(ChatId, String),
}

#[derive(Default)]
struct ApiInner {
    calls: RefCell<Vec<ApiCall>>,
    chats: RefCell<Vec<Chat>>,
    visitors: RefCell<Vec<Visitor>>,
    messages: RefCell<HashMap<ChatId, Vec<Message>>>,
    created_chat_id: RefCell<Option<ChatId>>,
    failure: RefCell<Option<ClientError>>,
    list_messages_failure: RefCell<Option<ClientError>>,
    list_messages_hook: RefCell<Option<Box<dyn FnOnce()>>>,
}

/// Serves canned responses and records every call it receives.
#[derive(Clone, Default)]
pub struct MockApi(Rc<ApiInner>);

impl MockApi {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.0.calls.borrow().clone()
    }

    pub fn count(&self, matches: impl Fn(&ApiCall) -> bool) -> usize {
        self.0.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    pub fn set_chats(&self, chats: Vec<Chat>) {
        *self.0.chats.borrow_mut() = chats;
    }

    pub fn set_visitors(&self, visitors: Vec<Visitor>) {
        *self.0.visitors.borrow_mut() = visitors;
    }

    pub fn set_messages(&self, chat_id: ChatId, messages: Vec<Message>) {
        self.0.messages.borrow_mut().insert(chat_id, messages);
    }

    pub fn set_created_chat_id(&self, id: Option<ChatId>) {
        *self.0.created_chat_id.borrow_mut() = id;
    }

    /// Every following call fails with `err` until [`MockApi::recover`].
    pub fn fail_with(&self, err: ClientError) {
        *self.0.failure.borrow_mut() = Some(err);
    }

    pub fn recover(&self) {
        self.0.failure.borrow_mut().take();
        self.0.list_messages_failure.borrow_mut().take();
    }

    /// Only `list_messages` fails with `err` until [`MockApi::recover`].
    pub fn fail_list_messages_with(&self, err: ClientError) {
        *self.0.list_messages_failure.borrow_mut() = Some(err);
    }

    /// Runs `hook` while the next `list_messages` request is in flight.
    pub fn on_next_list_messages(&self, hook: impl FnOnce() + 'static) {
        *self.0.list_messages_hook.borrow_mut() = Some(Box::new(hook));
    }

    fn record(&self, call: ApiCall) -> Result<(), ClientError> {
        self.0.calls.borrow_mut().push(call);
        match self.0.failure.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl ChatApi for MockApi {
    async fn list_chats(&self) -> Result<Vec<Chat>, ClientError> {
        self.record(ApiCall::ListChats)?;
        Ok(self.0.chats.borrow().clone())
    }

    async fn create_chat(&self, body: &NewChat) -> Result<CreatedChat, ClientError> {
        self.record(ApiCall::CreateChat(body.visitor_name.clone()))?;
        Ok(CreatedChat {
            id: self.0.created_chat_id.borrow().clone(),
            visitor_name: body.visitor_name.clone(),
        })
    }

    async fn list_visitors(&self) -> Result<Vec<Visitor>, ClientError> {
        self.record(ApiCall::ListVisitors)?;
        Ok(self.0.visitors.borrow().clone())
    }

    async fn list_messages(&self, chat_id: &ChatId) -> Result<Vec<Message>, ClientError> {
        self.record(ApiCall::ListMessages(chat_id.clone()))?;
        if let Some(err) = self.0.list_messages_failure.borrow().clone() {
            return Err(err);
        }
        let hook = self.0.list_messages_hook.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
        Ok(self.0.messages.borrow().get(chat_id).cloned().unwrap_or_default())
    }

    async fn send_message(
        &self,
        chat_id: &ChatId,
        body: &NewMessage,
    ) -> Result<CreatedMessage, ClientError> {
        self.record(ApiCall::SendMessage(chat_id.clone(), body.message.clone()))?;
        Ok(CreatedMessage {
            id: None,
            sender_name: Some("You".to_string()),
            message: body.message.clone(),
        })
    }
}

// ── View ──────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ViewInner {
    chats: RefCell<Vec<ChatRow>>,
    visitors: RefCell<Vec<VisitorRow>>,
    messages: RefCell<Vec<MessageRow>>,
    chat_renders: Cell<usize>,
    message_renders: Cell<usize>,
    screen: Cell<Screen>,
    visitor_name_clears: Cell<usize>,
    message_clears: Cell<usize>,
    reloads: Cell<usize>,
}

/// Remembers the last thing rendered into each list.
#[derive(Clone, Default)]
pub struct RecordingView(Rc<ViewInner>);

impl RecordingView {
    pub fn chat_labels(&self) -> Vec<String> {
        self.0.chats.borrow().iter().map(|row| row.label.clone()).collect()
    }

    pub fn visitor_labels(&self) -> Vec<String> {
        self.0.visitors.borrow().iter().map(|row| row.label.clone()).collect()
    }

    pub fn message_labels(&self) -> Vec<String> {
        self.0.messages.borrow().iter().map(|row| row.label.clone()).collect()
    }

    pub fn chat_renders(&self) -> usize {
        self.0.chat_renders.get()
    }

    pub fn message_renders(&self) -> usize {
        self.0.message_renders.get()
    }

    pub fn screen(&self) -> Screen {
        self.0.screen.get()
    }

    pub fn visitor_name_clears(&self) -> usize {
        self.0.visitor_name_clears.get()
    }

    pub fn message_clears(&self) -> usize {
        self.0.message_clears.get()
    }

    pub fn reloads(&self) -> usize {
        self.0.reloads.get()
    }
}

impl ChatView for RecordingView {
    fn render_chats(&self, rows: Vec<ChatRow>) {
        *self.0.chats.borrow_mut() = rows;
        self.0.chat_renders.set(self.0.chat_renders.get() + 1);
    }

    fn render_visitors(&self, rows: Vec<VisitorRow>) {
        *self.0.visitors.borrow_mut() = rows;
    }

    fn render_messages(&self, rows: Vec<MessageRow>) {
        *self.0.messages.borrow_mut() = rows;
        self.0.message_renders.set(self.0.message_renders.get() + 1);
    }

    fn show_screen(&self, screen: Screen) {
        self.0.screen.set(screen);
    }

    fn clear_visitor_name(&self) {
        self.0.visitor_name_clears.set(self.0.visitor_name_clears.get() + 1);
    }

    fn clear_message(&self) {
        self.0.message_clears.set(self.0.message_clears.get() + 1);
    }

    fn reload(&self) {
        self.0.reloads.set(self.0.reloads.get() + 1);
    }
}

// ── Platform ──────────────────────────────────────────────────────────────────

enum Callback {
    Repeat { period: TimeDelta, next_due: DateTime<Utc>, tick: Rc<RefCell<Box<dyn FnMut()>>> },
    Once { due: DateTime<Utc>, fire: Option<Box<dyn FnOnce()>> },
}

struct Timer {
    cancelled: Rc<Cell<bool>>,
    callback: Callback,
}

impl Timer {
    fn is_live(&self) -> bool {
        !self.cancelled.get() && !matches!(self.callback, Callback::Once { fire: None, .. })
    }
}

/// Handle for a fake timer; dropping it cancels the timer.
pub struct TestTask {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for TestTask {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

struct PlatformInner {
    now: Cell<DateTime<Utc>>,
    spawned: RefCell<VecDeque<LocalBoxFuture<'static, ()>>>,
    timers: RefCell<Vec<Timer>>,
}

/// A clock that only moves when told to, a FIFO of spawned futures and
/// timers that fire from [`ManualPlatform::advance`].
#[derive(Clone)]
pub struct ManualPlatform(Rc<PlatformInner>);

impl Default for ManualPlatform {
    fn default() -> Self {
        let start = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap_or_default();
        Self(Rc::new(PlatformInner {
            now: Cell::new(start),
            spawned: RefCell::new(VecDeque::new()),
            timers: RefCell::new(Vec::new()),
        }))
    }
}

impl ManualPlatform {
    /// Moves the clock forward and runs every timer callback that came due.
    /// Spawned work is queued, not run; see [`ManualPlatform::run_until_idle`].
    pub fn advance(&self, by: Duration) {
        let now = self.0.now.get() + TimeDelta::from_std(by).unwrap_or(TimeDelta::MAX);
        self.0.now.set(now);

        let mut ticks = Vec::new();
        let mut fires = Vec::new();
        for timer in self.0.timers.borrow_mut().iter_mut() {
            if timer.cancelled.get() {
                continue;
            }
            match &mut timer.callback {
                Callback::Repeat { period, next_due, tick } => {
                    while *next_due <= now {
                        ticks.push(Rc::clone(tick));
                        *next_due += *period;
                    }
                }
                Callback::Once { due, fire } => {
                    if *due <= now {
                        if let Some(fire) = fire.take() {
                            fires.push(fire);
                        }
                    }
                }
            }
        }

        for tick in ticks {
            (&mut *tick.borrow_mut())();
        }
        for fire in fires {
            fire();
        }
    }

    /// Drives spawned futures, including ones spawned along the way, until
    /// the queue is empty.
    pub async fn run_until_idle(&self) {
        loop {
            let next = self.0.spawned.borrow_mut().pop_front();
            match next {
                Some(task) => task.await,
                None => break,
            }
        }
    }

    pub fn live_timers(&self) -> usize {
        self.0.timers.borrow().iter().filter(|timer| timer.is_live()).count()
    }

    pub fn cancelled_timers(&self) -> usize {
        self.0.timers.borrow().iter().filter(|timer| timer.cancelled.get()).count()
    }

    fn register(&self, callback: Callback) -> TestTask {
        let cancelled = Rc::new(Cell::new(false));
        self.0.timers.borrow_mut().push(Timer { cancelled: Rc::clone(&cancelled), callback });
        TestTask { cancelled }
    }
}

impl Platform for ManualPlatform {
    type Task = TestTask;

    fn now(&self) -> DateTime<Utc> {
        self.0.now.get()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.0.spawned.borrow_mut().push_back(task);
    }

    fn repeat(&self, period: Duration, tick: Box<dyn FnMut()>) -> TestTask {
        let period = TimeDelta::from_std(period).unwrap_or(TimeDelta::MAX);
        self.register(Callback::Repeat {
            period,
            next_due: self.now() + period,
            tick: Rc::new(RefCell::new(tick)),
        })
    }

    fn defer(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> TestTask {
        let due = self.now() + TimeDelta::from_std(delay).unwrap_or(TimeDelta::MAX);
        self.register(Callback::Once { due, fire: Some(fire) })
    }
}
