//! Core of the polling chat client.
//!
//! Everything here is independent of the browser: the transport, the DOM and
//! the timers are reached through the [`ChatApi`], [`ChatView`] and
//! [`Platform`] traits, which the `frontend` crate implements with
//! `gloo-net`, Leptos signals and `gloo-timers`.

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod platform;
pub mod state;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::ChatApi;
pub use client::{ChatClient, Refresh, UiEvent};
pub use config::ClientConfig;
pub use errors::ClientError;
pub use models::{Chat, ChatId, CreatedChat, CreatedMessage, Message, NewChat, NewMessage, Visitor};
pub use platform::Platform;
pub use state::{ClientState, Throttle};
pub use view::{ChatRow, ChatView, MessageRow, Screen, VisitorRow};
