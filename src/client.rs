use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::api::ChatApi;
use crate::config::ClientConfig;
use crate::errors::{ClientError, validate_field};
use crate::models::{
    ChatId, CreatedChat, CreatedMessage, MAX_MESSAGE_LENGTH, MAX_VISITOR_NAME_LENGTH, NewChat,
    NewMessage,
};
use crate::platform::Platform;
use crate::state::ClientState;
use crate::view::{ChatRow, ChatView, MessageRow, Screen, VisitorRow};

/// What a refresh call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Throttled, or nothing to refresh.
    Skipped,
    /// The response belonged to a chat that is no longer open.
    Stale,
    /// The list was replaced with this many rows.
    Rendered(usize),
}

/// User actions coming from the page.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    StartChat(String),
    SendMessage(String),
    SelectChat(ChatId),
    Back,
}

/// Polls the chat API and pushes the results into a [`ChatView`].
///
/// Lives behind an `Rc`: scheduled tasks hold `Weak` references back to it,
/// and every handle they return is owned here, so dropping the client (or
/// calling [`ChatClient::stop`]) cancels all polling.
pub struct ChatClient<A, V, P: Platform> {
    api: A,
    view: V,
    platform: P,
    config: ClientConfig,
    state: RefCell<ClientState>,
    chat_poll: RefCell<Option<P::Task>>,
    message_poll: RefCell<Option<P::Task>>,
    pending_refresh: RefCell<Option<P::Task>>,
}

impl<A, V, P> ChatClient<A, V, P>
where
    A: ChatApi + 'static,
    V: ChatView + 'static,
    P: Platform + 'static,
{
    pub fn new(api: A, view: V, platform: P, config: ClientConfig) -> Self {
        let state = ClientState::new(config.refresh_window, platform.now());
        Self {
            api,
            view,
            platform,
            config,
            state: RefCell::new(state),
            chat_poll: RefCell::new(None),
            message_poll: RefCell::new(None),
            pending_refresh: RefCell::new(None),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn current_chat_id(&self) -> Option<ChatId> {
        self.state.borrow().current_chat_id.clone()
    }

    /// Forces one chat-list refresh, then keeps polling it.
    pub fn start(self: &Rc<Self>) {
        info!(api_base = %self.config.api_base, "starting chat client");
        self.spawn_chat_list_refresh(true);

        let weak = Rc::downgrade(self);
        let task = self.platform.repeat(
            self.config.chat_poll_period,
            Box::new(move || {
                if let Some(client) = weak.upgrade() {
                    client.spawn_chat_list_refresh(false);
                }
            }),
        );
        *self.chat_poll.borrow_mut() = Some(task);
    }

    /// Cancels every scheduled task.
    pub fn stop(&self) {
        self.chat_poll.borrow_mut().take();
        self.message_poll.borrow_mut().take();
        self.pending_refresh.borrow_mut().take();
        info!("chat client stopped");
    }

    /// Runs the operation behind a UI event in the background, logging any
    /// failure.
    pub fn handle(self: &Rc<Self>, event: UiEvent) {
        let client = Rc::clone(self);
        self.platform.spawn(Box::pin(async move {
            let outcome = match event {
                UiEvent::StartChat(visitor_name) => {
                    client.create_chat(&visitor_name).await.map(drop)
                }
                UiEvent::SendMessage(text) => client.send_message(&text).await.map(drop),
                UiEvent::SelectChat(chat_id) => {
                    client.select_chat(chat_id).await;
                    Ok(())
                }
                UiEvent::Back => {
                    client.go_back();
                    Ok(())
                }
            };
            match outcome {
                Err(err) if err.is_validation() => warn!("Ignoring input: {err}"),
                Err(err) => error!("Chat action failed: {err}"),
                Ok(()) => {}
            }
        }));
    }

    /// Creates a chat for `visitor_name` and re-reads the chat list once the
    /// server has had time to register it.
    ///
    /// Any response from the server, including a rejection, completes the
    /// request: the input is cleared and the refresh scheduled before the
    /// error is returned. Only a request that never got an answer leaves the
    /// page untouched.
    pub async fn create_chat(
        self: &Rc<Self>,
        visitor_name: &str,
    ) -> Result<CreatedChat, ClientError> {
        validate_field("visitor_name", visitor_name, MAX_VISITOR_NAME_LENGTH)?;

        let body = NewChat { visitor_name: visitor_name.to_string() };
        let outcome = self.api.create_chat(&body).await;
        if matches!(&outcome, Err(err) if !err.has_response()) {
            return outcome;
        }

        self.view.clear_visitor_name();
        match &outcome {
            Ok(created) => {
                info!(chat_id = ?created.id, visitor_name = %created.visitor_name, "created chat");
            }
            Err(err) => warn!("Chat creation rejected: {err}"),
        }

        let weak = Rc::downgrade(self);
        let task = self.platform.defer(
            self.config.propagation_delay,
            Box::new(move || {
                if let Some(client) = weak.upgrade() {
                    client.spawn_chat_list_refresh(true);
                }
            }),
        );
        *self.pending_refresh.borrow_mut() = Some(task);
        outcome
    }

    /// Posts `text` to the open chat and immediately re-reads its messages.
    ///
    /// As with [`ChatClient::create_chat`], a rejected post still clears the
    /// input and refreshes. A failed refresh after an accepted post is only
    /// logged; the message was sent.
    pub async fn send_message(&self, text: &str) -> Result<CreatedMessage, ClientError> {
        let chat_id = self.current_chat_id().ok_or(ClientError::NoChatSelected)?;
        validate_field("message", text, MAX_MESSAGE_LENGTH)?;

        let body = NewMessage { message: text.to_string() };
        let outcome = self.api.send_message(&chat_id, &body).await;
        if matches!(&outcome, Err(err) if !err.has_response()) {
            return outcome;
        }

        self.view.clear_message();
        match &outcome {
            Ok(_) => debug!(%chat_id, "sent message"),
            Err(err) => warn!(%chat_id, "Message rejected: {err}"),
        }

        if let Err(err) = self.refresh_message_list(true).await {
            error!("Failed to fetch messages: {err}");
        }
        outcome
    }

    pub async fn refresh_chat_list(&self, force: bool) -> Result<Refresh, ClientError> {
        if !self.state.borrow().chat_list.is_due(self.platform.now(), force) {
            return Ok(Refresh::Skipped);
        }

        debug!("fetching chats..");
        let chats = self.api.list_chats().await?;
        let rows: Vec<ChatRow> = chats.iter().map(ChatRow::from).collect();
        let count = rows.len();
        self.view.render_chats(rows);
        self.state.borrow_mut().chat_list.record(self.platform.now());
        Ok(Refresh::Rendered(count))
    }

    pub async fn refresh_visitor_list(&self, force: bool) -> Result<Refresh, ClientError> {
        if !self.state.borrow().visitor_list.is_due(self.platform.now(), force) {
            return Ok(Refresh::Skipped);
        }

        debug!("fetching visitors..");
        let visitors = self.api.list_visitors().await?;
        let rows: Vec<VisitorRow> = visitors.iter().map(VisitorRow::from).collect();
        let count = rows.len();
        self.view.render_visitors(rows);
        self.state.borrow_mut().visitor_list.record(self.platform.now());
        Ok(Refresh::Rendered(count))
    }

    pub async fn refresh_message_list(&self, force: bool) -> Result<Refresh, ClientError> {
        let chat_id = {
            let state = self.state.borrow();
            match &state.current_chat_id {
                Some(chat_id) if state.message_list.is_due(self.platform.now(), force) => {
                    chat_id.clone()
                }
                _ => return Ok(Refresh::Skipped),
            }
        };

        debug!(%chat_id, "fetching messages..");
        let messages = self.api.list_messages(&chat_id).await?;
        if !self.state.borrow().is_open(&chat_id) {
            debug!(%chat_id, "discarding messages of a chat that is no longer open");
            return Ok(Refresh::Stale);
        }

        let rows: Vec<MessageRow> = messages.iter().map(MessageRow::from).collect();
        let count = rows.len();
        self.view.render_messages(rows);
        self.state.borrow_mut().message_list.record(self.platform.now());
        Ok(Refresh::Rendered(count))
    }

    /// Opens `chat_id`: switches panes, loads its messages and polls them,
    /// replacing the poll of any previously opened chat.
    pub async fn select_chat(self: &Rc<Self>, chat_id: ChatId) {
        info!(%chat_id, "opening chat");
        self.state.borrow_mut().current_chat_id = Some(chat_id);
        self.view.show_screen(Screen::ChatHistory);
        self.message_poll.borrow_mut().take();

        if let Err(err) = self.refresh_message_list(true).await {
            error!("Failed to fetch messages: {err}");
        }

        let weak = Rc::downgrade(self);
        let task = self.platform.repeat(
            self.config.message_poll_period,
            Box::new(move || {
                if let Some(client) = weak.upgrade() {
                    client.spawn_message_list_refresh(false);
                }
            }),
        );
        *self.message_poll.borrow_mut() = Some(task);
    }

    /// Leaves the open chat by reloading the page.
    pub fn go_back(&self) {
        self.message_poll.borrow_mut().take();
        self.state.borrow_mut().current_chat_id = None;
        self.view.reload();
    }

    fn spawn_chat_list_refresh(self: &Rc<Self>, force: bool) {
        let client = Rc::clone(self);
        self.platform.spawn(Box::pin(async move {
            if let Err(err) = client.refresh_chat_list(force).await {
                error!("Failed to fetch chats: {err}");
            }
            if client.config.poll_visitors {
                if let Err(err) = client.refresh_visitor_list(force).await {
                    error!("Failed to fetch visitors: {err}");
                }
            }
        }));
    }

    fn spawn_message_list_refresh(self: &Rc<Self>, force: bool) {
        let client = Rc::clone(self);
        self.platform.spawn(Box::pin(async move {
            if let Err(err) = client.refresh_message_list(force).await {
                error!("Failed to fetch messages: {err}");
            }
        }));
    }
}
