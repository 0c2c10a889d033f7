use crate::models::{Chat, ChatId, Message, Visitor};

/// Which of the two panes is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    ConversationList,
    ChatHistory,
}

impl Screen {
    /// CSS `display` value for the `conversation-list` pane.
    pub fn conversation_list_display(self) -> &'static str {
        match self {
            Screen::ConversationList => "block",
            Screen::ChatHistory => "none",
        }
    }

    /// CSS `display` value for the `chat-history` pane.
    pub fn chat_history_display(self) -> &'static str {
        match self {
            Screen::ConversationList => "none",
            Screen::ChatHistory => "block",
        }
    }
}

/// A clickable row in `chat-list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRow {
    pub chat_id: ChatId,
    pub label: String,
}

impl From<&Chat> for ChatRow {
    fn from(chat: &Chat) -> Self {
        Self {
            chat_id: chat.id.clone(),
            label: format!("Chat of \"{}\"", chat.visitor_name),
        }
    }
}

/// A clickable row in `visitor-list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorRow {
    pub chat_id: ChatId,
    pub label: String,
}

impl From<&Visitor> for VisitorRow {
    fn from(visitor: &Visitor) -> Self {
        Self {
            chat_id: visitor.id.clone(),
            label: format!("\"{}\"", visitor.visitor_name),
        }
    }
}

/// A row in `message-list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub label: String,
}

impl From<&Message> for MessageRow {
    fn from(message: &Message) -> Self {
        Self { label: format!("{}: \"{}\"", message.sender_name, message.message) }
    }
}

/// The rendering surface the client drives.
///
/// Every `render_*` call carries the complete list in response order and
/// replaces whatever was shown before.
pub trait ChatView {
    fn render_chats(&self, rows: Vec<ChatRow>);
    fn render_visitors(&self, rows: Vec<VisitorRow>);
    fn render_messages(&self, rows: Vec<MessageRow>);
    fn show_screen(&self, screen: Screen);
    /// Empties the `visitor-name` input.
    fn clear_visitor_name(&self);
    /// Empties the `message` input.
    fn clear_message(&self);
    /// Reloads the page, dropping all client state and timers.
    fn reload(&self);
}
