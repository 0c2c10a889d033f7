use leptos::ev;
use leptos::prelude::*;

use polling_chat::{ChatId, UiEvent};

use crate::state::{AppState, ClientHandle};

/// Start-chat form plus the polled chat and visitor lists.
#[component]
pub fn ConversationList() -> impl IntoView {
    let state = expect_context::<AppState>();
    let client = expect_context::<ClientHandle>();

    let on_start = move |_| {
        client.dispatch(UiEvent::StartChat(state.visitor_name.get_untracked()));
    };

    view! {
        <div
            id="conversation-list"
            style:display=move || state.screen.get().conversation_list_display()
        >
            <div class="input-row">
                <input
                    id="visitor-name"
                    type="text"
                    placeholder="Visitor name"
                    prop:value=move || state.visitor_name.get()
                    on:input=move |ev| {
                        state.visitor_name.set(event_target_value(&ev));
                    }
                />
                <button id="start-chat" class="btn btn-primary" on:click=on_start>
                    "Start chat"
                </button>
            </div>

            <h5>"Chats"</h5>
            <div id="chat-list" class="list-group">
                <For
                    each=move || state.chats.get()
                    key=|row| (row.chat_id.clone(), row.label.clone())
                    let:row
                >
                    <SelectableRow chat_id=row.chat_id label=row.label />
                </For>
            </div>

            <h5>"Visitors"</h5>
            <div id="visitor-list" class="list-group">
                <For
                    each=move || state.visitors.get()
                    key=|row| (row.chat_id.clone(), row.label.clone())
                    let:row
                >
                    <SelectableRow chat_id=row.chat_id label=row.label />
                </For>
            </div>
        </div>
    }
}

/// A list row that opens `chat_id` when clicked.
#[component]
fn SelectableRow(chat_id: ChatId, label: String) -> impl IntoView {
    let client = expect_context::<ClientHandle>();

    let on_click = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        client.dispatch(UiEvent::SelectChat(chat_id.clone()));
    };

    view! {
        <a href="#" class="list-group-item list-group-item-action" on:click=on_click>
            {label}
        </a>
    }
}
