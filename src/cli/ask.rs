//! One-shot `ask` command: a single question through the same coordinator the
//! chat uses, with the bot replies printed to stdout.

use std::error::Error;
use std::io::{self, Write};

use crate::api::client::HttpAnswerService;
use crate::core::answer_service::AnswerService;
use crate::core::conversation::ConversationEvent;
use crate::core::coordinator::RequestCoordinator;
use crate::core::message::Message;

/// Submits `question` on a fresh conversation and returns the bot messages the
/// reply appended. `None` when the question was blank.
pub async fn ask_once<S>(question: &str, service: &S) -> Option<Vec<Message>>
where
    S: AnswerService + ?Sized,
{
    let mut coordinator = RequestCoordinator::new();
    let mut events = coordinator.subscribe();

    if !coordinator.submit(question, service).await {
        return None;
    }

    let mut replies = Vec::new();
    while let Ok(ConversationEvent::Appended { message, .. }) = events.try_recv() {
        if message.sender().is_bot() {
            replies.push(message);
        }
    }
    Some(replies)
}

pub fn print_replies<W: Write>(replies: &[Message], json: bool, out: &mut W) -> io::Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(replies).map_err(io::Error::other)?;
        writeln!(out, "{rendered}")?;
        return Ok(());
    }

    for reply in replies {
        writeln!(out, "{}", reply.text())?;
    }
    Ok(())
}

pub async fn run_ask(
    question: &str,
    json: bool,
    service: &HttpAnswerService,
) -> Result<(), Box<dyn Error>> {
    let Some(replies) = ask_once(question, service).await else {
        eprintln!("❌ Question cannot be empty");
        eprintln!("   Usage: rentalqa ask <QUESTION>...");
        std::process::exit(2);
    };

    let stdout = io::stdout();
    print_replies(&replies, json, &mut stdout.lock())?;
    Ok(())
}
