//! Shared constants used across the application

/// First message of every conversation.
pub const GREETING_TEXT: &str = "Hi! Ask me anything about Sixt car rentals.";

/// Bot reply when the service answered but had nothing to say.
pub const NO_ANSWER_TEXT: &str = "Sorry, I could not find an answer.";

/// Bot reply for any transport, status or decoding failure.
pub const BACKEND_ERROR_TEXT: &str = "Error connecting to backend.";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
