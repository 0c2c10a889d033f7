use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const MAX_VISITOR_NAME_LENGTH: usize = 256;
pub const MAX_MESSAGE_LENGTH: usize = 2048;

/// Opaque chat identifier. The server may hand out UUID strings or integers;
/// both are kept verbatim and rendered back into request paths unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatId(String);

impl ChatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChatId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i32> for ChatId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for ChatId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ChatId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(id) => ChatId::from(id),
            RawId::Text(id) => ChatId(id),
        })
    }
}

/// A chat conversation as listed by `GET /api/chats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub visitor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Chat {
    pub fn new(id: impl Into<ChatId>, visitor_name: impl Into<String>) -> Self {
        Self { id: id.into(), visitor_name: visitor_name.into(), created_at: None }
    }
}

/// A visitor record from `GET /api/visitors`; same shape as [`Chat`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visitor {
    pub id: ChatId,
    pub visitor_name: String,
}

/// A chat message from `GET /api/chats/{id}/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(sender_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sender_name: sender_name.into(),
            message: message.into(),
            id: None,
            sender_id: None,
            created_at: None,
        }
    }
}

/// Request body for `POST /api/chats/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChat {
    pub visitor_name: String,
}

/// Response of `POST /api/chats/`. Servers that only echo the validated body
/// leave out the id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedChat {
    #[serde(default)]
    pub id: Option<ChatId>,
    pub visitor_name: String,
}

/// Request body for `POST /api/chats/{id}/messages/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    pub message: String,
}

/// Response of `POST /api/chats/{id}/messages/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedMessage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub message: String,
}
