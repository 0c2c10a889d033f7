use std::time::Duration;

pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_millis(500);
pub const DEFAULT_REFRESH_WINDOW: Duration = Duration::from_millis(1000);
pub const DEFAULT_PROPAGATION_DELAY: Duration = Duration::from_millis(1000);

/// Tunables for [`crate::ChatClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prefix for every API path. Empty means "same origin as the page".
    pub api_base: String,
    /// How often the chat list (and visitor list) poll ticks.
    pub chat_poll_period: Duration,
    /// How often the open chat's messages poll ticks.
    pub message_poll_period: Duration,
    /// Unforced refreshes inside this window after the last one are skipped.
    pub refresh_window: Duration,
    /// Delay before re-reading the chat list after creating a chat.
    pub propagation_delay: Duration,
    pub poll_visitors: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            chat_poll_period: DEFAULT_POLL_PERIOD,
            message_poll_period: DEFAULT_POLL_PERIOD,
            refresh_window: DEFAULT_REFRESH_WINDOW,
            propagation_delay: DEFAULT_PROPAGATION_DELAY,
            poll_visitors: true,
        }
    }
}

impl ClientConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        // Normalize: remove trailing slash
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_poll_periods(mut self, chat: Duration, message: Duration) -> Self {
        self.chat_poll_period = chat;
        self.message_poll_period = message;
        self
    }

    pub fn with_refresh_window(mut self, window: Duration) -> Self {
        self.refresh_window = window;
        self
    }

    pub fn with_propagation_delay(mut self, delay: Duration) -> Self {
        self.propagation_delay = delay;
        self
    }

    pub fn with_visitor_polling(mut self, enabled: bool) -> Self {
        self.poll_visitors = enabled;
        self
    }

    /// Joins `path` (which starts with `/`) onto the configured base.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}
