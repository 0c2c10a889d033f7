use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use polling_chat::api::routes;
use polling_chat::{
    Chat, ChatApi, ChatId, ClientConfig, ClientError, CreatedChat, CreatedMessage, Message,
    NewChat, NewMessage, Visitor,
};

/// `ChatApi` over `fetch`, relative to the configured API base.
#[derive(Clone)]
pub struct HttpApi {
    config: ClientConfig,
}

impl HttpApi {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = Request::get(&self.config.url(path))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        decode(resp).await
    }

    /// POSTs `body` as JSON; `.json()` also sets `Content-Type: application/json`.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = Request::post(&self.config.url(path))
            .json(body)
            .map_err(|e| ClientError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    if !resp.ok() {
        return Err(ClientError::Status { status: resp.status() });
    }

    resp.json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl ChatApi for HttpApi {
    async fn list_chats(&self) -> Result<Vec<Chat>, ClientError> {
        self.get_json(&routes::chats()).await
    }

    async fn create_chat(&self, body: &NewChat) -> Result<CreatedChat, ClientError> {
        self.post_json(&routes::create_chat(), body).await
    }

    async fn list_visitors(&self) -> Result<Vec<Visitor>, ClientError> {
        self.get_json(&routes::visitors()).await
    }

    async fn list_messages(&self, chat_id: &ChatId) -> Result<Vec<Message>, ClientError> {
        self.get_json(&routes::messages(chat_id)).await
    }

    async fn send_message(
        &self,
        chat_id: &ChatId,
        body: &NewMessage,
    ) -> Result<CreatedMessage, ClientError> {
        self.post_json(&routes::send_message(chat_id), body).await
    }
}
