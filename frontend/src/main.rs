mod api;
mod components;
mod platform;
mod state;

use std::rc::Rc;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use polling_chat::{ChatClient, ClientConfig};

use api::HttpApi;
use components::chat_history::ChatHistory;
use components::conversation_list::ConversationList;
use platform::BrowserPlatform;
use state::{AppState, ClientHandle};

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    let config = ClientConfig::default();
    let api = HttpApi::new(config.clone());
    let client = Rc::new(ChatClient::new(api, state, BrowserPlatform, config));

    // Initial load, then poll the chat list
    client.start();
    let client = ClientHandle::provide(client);
    on_cleanup(move || client.stop());

    view! {
        <div class="container">
            <ConversationList />
            <ChatHistory />
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
