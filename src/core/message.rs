use serde::{Deserialize, Serialize};

use crate::api::AnswerFragment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Prefix shown in front of the message in the transcript.
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Bot",
        }
    }

    pub fn is_bot(self) -> bool {
        self == Sender::Bot
    }
}

/// A single chat bubble. Fields are private so a message cannot change once
/// it has been appended to a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    sender: Sender,
    text: String,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    /// Formats a fragment as `"<section>: <content>"`.
    pub fn from_fragment(fragment: &AnswerFragment) -> Self {
        Self::bot(format!("{}: {}", fragment.section, fragment.content))
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
