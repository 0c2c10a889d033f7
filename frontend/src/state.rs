use std::rc::Rc;

use leptos::prelude::*;

use polling_chat::{ChatClient, ChatRow, ChatView, MessageRow, Screen, UiEvent, VisitorRow};

use crate::api::HttpApi;
use crate::platform::BrowserPlatform;

pub type Client = ChatClient<HttpApi, AppState, BrowserPlatform>;

/// Reactive page state, provided via Leptos context. The client writes into
/// it through `ChatView`; components only read it (and the two inputs).
#[derive(Clone, Copy)]
pub struct AppState {
    pub chats: RwSignal<Vec<ChatRow>>,
    pub visitors: RwSignal<Vec<VisitorRow>>,
    pub messages: RwSignal<Vec<MessageRow>>,
    pub screen: RwSignal<Screen>,

    // --- Input fields ---
    pub visitor_name: RwSignal<String>,
    pub message: RwSignal<String>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let state = Self {
            chats: RwSignal::new(Vec::new()),
            visitors: RwSignal::new(Vec::new()),
            messages: RwSignal::new(Vec::new()),
            screen: RwSignal::new(Screen::default()),
            visitor_name: RwSignal::new(String::new()),
            message: RwSignal::new(String::new()),
        };

        provide_context(state);
        state
    }
}

impl ChatView for AppState {
    fn render_chats(&self, rows: Vec<ChatRow>) {
        self.chats.set(rows);
    }

    fn render_visitors(&self, rows: Vec<VisitorRow>) {
        self.visitors.set(rows);
    }

    fn render_messages(&self, rows: Vec<MessageRow>) {
        self.messages.set(rows);
    }

    fn show_screen(&self, screen: Screen) {
        self.screen.set(screen);
    }

    fn clear_visitor_name(&self) {
        self.visitor_name.set(String::new());
    }

    fn clear_message(&self) {
        self.message.set(String::new());
    }

    fn reload(&self) {
        let Some(window) = web_sys::window() else {
            log::error!("No window to reload");
            return;
        };
        if let Err(err) = window.location().reload() {
            log::error!("Failed to reload page: {err:?}");
        }
    }
}

/// Copyable handle to the client for event handlers. The client itself is
/// `!Send`, so it lives in local arena storage.
#[derive(Clone, Copy)]
pub struct ClientHandle(StoredValue<Rc<Client>, LocalStorage>);

impl ClientHandle {
    /// Wrap `client` and provide the handle in the current Leptos context.
    pub fn provide(client: Rc<Client>) -> Self {
        let handle = Self(StoredValue::new_local(client));
        provide_context(handle);
        handle
    }

    pub fn dispatch(&self, event: UiEvent) {
        self.0.with_value(|client| client.handle(event));
    }

    pub fn stop(&self) {
        self.0.with_value(|client| client.stop());
    }
}
