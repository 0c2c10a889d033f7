use async_trait::async_trait;

use crate::errors::ClientError;
use crate::models::{
    Chat, ChatId, CreatedChat, CreatedMessage, Message, NewChat, NewMessage, Visitor,
};

/// The REST surface the client consumes.
///
/// Futures are `?Send`: in the browser they run on the single UI thread via
/// `spawn_local`.
#[async_trait(?Send)]
pub trait ChatApi {
    /// `GET /api/chats`
    async fn list_chats(&self) -> Result<Vec<Chat>, ClientError>;

    /// `POST /api/chats/`
    async fn create_chat(&self, body: &NewChat) -> Result<CreatedChat, ClientError>;

    /// `GET /api/visitors`
    async fn list_visitors(&self) -> Result<Vec<Visitor>, ClientError>;

    /// `GET /api/chats/{chat_id}/messages`
    async fn list_messages(&self, chat_id: &ChatId) -> Result<Vec<Message>, ClientError>;

    /// `POST /api/chats/{chat_id}/messages/`
    async fn send_message(
        &self,
        chat_id: &ChatId,
        body: &NewMessage,
    ) -> Result<CreatedMessage, ClientError>;
}

/// Request paths, relative to the API base. Trailing slashes on the POST
/// routes are significant to the server's router.
pub mod routes {
    use crate::models::ChatId;

    pub fn chats() -> String {
        "/api/chats".to_string()
    }

    pub fn create_chat() -> String {
        "/api/chats/".to_string()
    }

    pub fn visitors() -> String {
        "/api/visitors".to_string()
    }

    pub fn messages(chat_id: &ChatId) -> String {
        format!("/api/chats/{}/messages", urlencoding::encode(chat_id.as_str()))
    }

    pub fn send_message(chat_id: &ChatId) -> String {
        format!("/api/chats/{}/messages/", urlencoding::encode(chat_id.as_str()))
    }
}
