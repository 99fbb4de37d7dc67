//! One-at-a-time question submission.
//!
//! [`RequestCoordinator`] owns the [`ConversationState`] and is the only
//! thing that mutates it. A submission moves the machine from
//! [`Phase::Idle`] to [`Phase::Awaiting`]; resolving the request with any
//! [`AnswerOutcome`] moves it back. Submissions while awaiting, and blank
//! questions, are dropped without a trace in the transcript.
//!
//! Terminal loops that cannot hold `&mut self` across an `.await` use
//! [`begin`](RequestCoordinator::begin) and
//! [`complete`](RequestCoordinator::complete); everyone else can call
//! [`submit`](RequestCoordinator::submit).

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::core::answer_service::{AnswerOutcome, AnswerService};
use crate::core::constants::{BACKEND_ERROR_TEXT, NO_ANSWER_TEXT};
use crate::core::conversation::{ConversationEvent, ConversationStore};
use crate::core::message::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Awaiting,
}

/// Everything the presentation layer needs to draw a session.
pub struct ConversationState {
    store: ConversationStore,
    pending_input: String,
    awaiting_response: bool,
}

impl ConversationState {
    fn new(store: ConversationStore) -> Self {
        Self {
            store,
            pending_input: String::new(),
            awaiting_response: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn awaiting_response(&self) -> bool {
        self.awaiting_response
    }
}

/// Proof that a question was dispatched. Only one exists at a time per
/// coordinator, and handing it back to
/// [`complete`](RequestCoordinator::complete) is the only way out of
/// [`Phase::Awaiting`].
#[derive(Debug)]
#[must_use = "an in-flight request must be completed or the input stays locked"]
pub struct PendingRequest {
    id: u64,
    question: String,
}

impl PendingRequest {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}

pub struct RequestCoordinator {
    state: ConversationState,
    last_request_id: u64,
}

impl RequestCoordinator {
    pub fn new() -> Self {
        Self::with_store(ConversationStore::new())
    }

    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self::with_store(ConversationStore::with_greeting(greeting))
    }

    pub fn with_store(store: ConversationStore) -> Self {
        Self {
            state: ConversationState::new(store),
            last_request_id: 0,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.awaiting_response {
            Phase::Awaiting
        } else {
            Phase::Idle
        }
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ConversationEvent> {
        self.state.store.subscribe()
    }

    /// Whether the current draft would be accepted by
    /// [`begin_pending`](Self::begin_pending).
    pub fn can_submit(&self) -> bool {
        Self::accepts(&self.state, &self.state.pending_input)
    }

    // Draft edits are ignored while awaiting, matching the disabled input box.

    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        if !self.state.awaiting_response {
            self.state.pending_input = text.into();
        }
    }

    pub fn push_input_char(&mut self, ch: char) {
        if !self.state.awaiting_response {
            self.state.pending_input.push(ch);
        }
    }

    pub fn push_input_str(&mut self, text: &str) {
        if !self.state.awaiting_response {
            self.state.pending_input.push_str(text);
        }
    }

    pub fn pop_input_char(&mut self) -> Option<char> {
        if self.state.awaiting_response {
            return None;
        }
        self.state.pending_input.pop()
    }

    fn accepts(state: &ConversationState, question: &str) -> bool {
        !state.awaiting_response && !question.trim().is_empty()
    }

    /// Records the question and locks the input. Returns `None`, leaving the
    /// state untouched, when a request is already in flight or the question is
    /// blank.
    pub fn begin(&mut self, question: &str) -> Option<PendingRequest> {
        if self.state.awaiting_response {
            debug!("submission dropped: a request is already in flight");
            return None;
        }
        if question.trim().is_empty() {
            return None;
        }

        self.state.store.append(Message::user(question));
        self.state.awaiting_response = true;
        self.state.pending_input.clear();
        self.last_request_id += 1;
        debug!(request_id = self.last_request_id, "question dispatched");

        Some(PendingRequest {
            id: self.last_request_id,
            question: question.to_string(),
        })
    }

    /// [`begin`](Self::begin) with the current draft.
    pub fn begin_pending(&mut self) -> Option<PendingRequest> {
        let question = self.state.pending_input.clone();
        self.begin(&question)
    }

    /// Appends the bot reply for `outcome` and unlocks the input.
    pub fn complete(&mut self, request: PendingRequest, outcome: AnswerOutcome) {
        if !self.state.awaiting_response || request.id != self.last_request_id {
            warn!(
                request_id = request.id,
                current = self.last_request_id,
                "ignoring completion for a request that is not in flight"
            );
            return;
        }

        debug!(
            request_id = request.id,
            outcome = outcome.kind(),
            "request resolved"
        );
        match outcome {
            AnswerOutcome::Answers(fragments) if !fragments.is_empty() => {
                for fragment in &fragments {
                    self.state.store.append(Message::from_fragment(fragment));
                }
            }
            AnswerOutcome::Answers(_) | AnswerOutcome::Empty => {
                self.state.store.append(Message::bot(NO_ANSWER_TEXT));
            }
            AnswerOutcome::Failed(_) => {
                self.state.store.append(Message::bot(BACKEND_ERROR_TEXT));
            }
        }
        self.state.awaiting_response = false;
    }

    /// Submits `question` and waits for the reply. Returns `false` when the
    /// submission was dropped.
    pub async fn submit<S>(&mut self, question: &str, service: &S) -> bool
    where
        S: AnswerService + ?Sized,
    {
        let Some(request) = self.begin(question) else {
            return false;
        };
        let outcome = service.ask(request.question()).await;
        self.complete(request, outcome);
        true
    }

    /// [`submit`](Self::submit) with the current draft.
    pub async fn submit_pending<S>(&mut self, service: &S) -> bool
    where
        S: AnswerService + ?Sized,
    {
        let question = self.state.pending_input.clone();
        self.submit(&question, service).await
    }
}

impl Default for RequestCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
