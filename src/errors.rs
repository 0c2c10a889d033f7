use thiserror::Error;

/// Everything that can stop a client operation from reaching the view.
/// All variants carry a human-readable message for logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    // ── Transport errors ─────────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {status}")]
    Status { status: u16 },

    #[error("Parse error: {0}")]
    Decode(String),

    #[error("Serialize error: {0}")]
    Encode(String),

    // ── Client state errors ──────────────────────────────────────────────────
    #[error("No chat selected")]
    NoChatSelected,

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },
}

impl ClientError {
    /// Errors caused by what the user typed rather than by the server.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::EmptyField { .. }
                | ClientError::FieldTooLong { .. }
                | ClientError::NoChatSelected
        )
    }

    /// The server answered, even if with a rejection or an unreadable body.
    pub fn has_response(&self) -> bool {
        matches!(self, ClientError::Status { .. } | ClientError::Decode(_))
    }
}

/// Rejects blank input and input longer than `max_length` characters.
pub fn validate_field(field_name: &str, value: &str, max_length: usize) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::EmptyField { field_name: field_name.to_string() });
    }
    let actual_length = value.chars().count();
    if actual_length > max_length {
        return Err(ClientError::FieldTooLong {
            field_name: field_name.to_string(),
            max_length,
            actual_length,
        });
    }
    Ok(())
}
