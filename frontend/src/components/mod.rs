pub mod chat_history;
pub mod conversation_list;
