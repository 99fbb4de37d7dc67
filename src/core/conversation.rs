//! Append-only message log with change notification.

use tokio::sync::mpsc;

use crate::core::constants::GREETING_TEXT;
use crate::core::message::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationEvent {
    Appended { index: usize, message: Message },
}

/// Ordered transcript of a session. The only mutation is [`append`].
///
/// [`append`]: ConversationStore::append
pub struct ConversationStore {
    messages: Vec<Message>,
    observers: Vec<mpsc::UnboundedSender<ConversationEvent>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::with_greeting(GREETING_TEXT)
    }

    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut store = Self {
            messages: Vec::new(),
            observers: Vec::new(),
        };
        store.seed(greeting.into());
        store
    }

    fn seed(&mut self, greeting: String) {
        self.append(Message::bot(greeting));
    }

    /// Adds `message` to the end of the log and notifies every live observer
    /// before returning.
    pub fn append(&mut self, message: Message) {
        let index = self.messages.len();
        self.messages.push(message.clone());
        self.observers.retain(|observer| {
            observer
                .send(ConversationEvent::Appended {
                    index,
                    message: message.clone(),
                })
                .is_ok()
        });
    }

    /// Registers an observer. Events start with the next append; the seed
    /// message is already in [`messages`](Self::messages).
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ConversationEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers.push(tx);
        rx
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Sender;

    #[test]
    fn new_store_holds_only_the_greeting() {
        let store = ConversationStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.messages()[0], Message::bot(GREETING_TEXT));
        assert_eq!(store.messages()[0].sender(), Sender::Bot);
    }

    #[test]
    fn custom_greeting_replaces_default_seed() {
        let store = ConversationStore::with_greeting("Welcome back.");
        assert_eq!(store.messages(), &[Message::bot("Welcome back.")]);
    }

    #[test]
    fn append_keeps_order_and_prior_entries() {
        let mut store = ConversationStore::new();
        let before: Vec<Message> = store.messages().to_vec();

        store.append(Message::user("first"));
        store.append(Message::bot("second"));

        assert_eq!(store.len(), 3);
        assert_eq!(&store.messages()[..1], before.as_slice());
        assert_eq!(store.messages()[1].text(), "first");
        assert_eq!(store.last().map(Message::text), Some("second"));
    }

    #[test]
    fn observers_are_notified_synchronously_with_index() {
        let mut store = ConversationStore::new();
        let mut rx = store.subscribe();

        store.append(Message::user("hello"));

        assert_eq!(
            rx.try_recv().expect("event delivered before append returns"),
            ConversationEvent::Appended {
                index: 1,
                message: Message::user("hello"),
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn every_observer_sees_every_append() {
        let mut store = ConversationStore::new();
        let mut first = store.subscribe();
        let mut second = store.subscribe();

        store.append(Message::bot("a"));
        store.append(Message::bot("b"));

        for rx in [&mut first, &mut second] {
            let indices: Vec<usize> = std::iter::from_fn(|| rx.try_recv().ok())
                .map(|ConversationEvent::Appended { index, .. }| index)
                .collect();
            assert_eq!(indices, vec![1, 2]);
        }
    }

    #[test]
    fn dropped_observers_are_pruned_on_append() {
        let mut store = ConversationStore::new();
        let kept = store.subscribe();
        drop(store.subscribe());
        assert_eq!(store.observer_count(), 2);

        store.append(Message::user("ping"));

        assert_eq!(store.observer_count(), 1);
        drop(kept);
    }
}
