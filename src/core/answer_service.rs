use async_trait::async_trait;

use crate::api::client::TransportError;
use crate::api::AnswerFragment;

/// What a single question produced.
#[derive(Debug)]
pub enum AnswerOutcome {
    /// One or more fragments, in the order the service sent them.
    Answers(Vec<AnswerFragment>),
    /// The service replied but the fragment list was empty or absent.
    Empty,
    /// The service could not be reached or replied with something unusable.
    Failed(TransportError),
}

impl AnswerOutcome {
    pub fn from_answers(answers: Option<Vec<AnswerFragment>>) -> Self {
        match answers {
            Some(fragments) if !fragments.is_empty() => AnswerOutcome::Answers(fragments),
            _ => AnswerOutcome::Empty,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnswerOutcome::Answers(_) => "answers",
            AnswerOutcome::Empty => "empty",
            AnswerOutcome::Failed(_) => "failed",
        }
    }
}

/// Anything that can turn a question into an [`AnswerOutcome`].
///
/// Implementations never return an error: failures are reported through
/// [`AnswerOutcome::Failed`].
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn ask(&self, question: &str) -> AnswerOutcome;
}
