use leptos::prelude::*;

use polling_chat::UiEvent;

use crate::state::{AppState, ClientHandle};

/// Messages of the open chat with the send form and back button.
#[component]
pub fn ChatHistory() -> impl IntoView {
    let state = expect_context::<AppState>();
    let client = expect_context::<ClientHandle>();

    let on_send = move |_| {
        client.dispatch(UiEvent::SendMessage(state.message.get_untracked()));
    };
    let on_back = move |_| client.dispatch(UiEvent::Back);

    view! {
        <div
            id="chat-history"
            style:display=move || state.screen.get().chat_history_display()
        >
            <button id="back" class="btn btn-link" on:click=on_back>
                "Back"
            </button>

            // Messages carry no stable id; position plus text keys each row.
            <div id="message-list" class="list-group">
                <For
                    each=move || state.messages.get().into_iter().enumerate()
                    key=|(index, row)| (*index, row.label.clone())
                    children=|(_, row)| {
                        view! { <a href="#" class="list-group-item">{row.label}</a> }
                    }
                />
            </div>

            <div class="input-row">
                <input
                    id="message"
                    type="text"
                    placeholder="Message"
                    prop:value=move || state.message.get()
                    on:input=move |ev| {
                        state.message.set(event_target_value(&ev));
                    }
                />
                <button id="send-message" class="btn btn-primary" on:click=on_send>
                    "Send"
                </button>
            </div>
        </div>
    }
}
