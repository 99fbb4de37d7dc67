//! Event polling, dispatching, and redraw loop for the terminal chat.
//!
//! The loop owns the [`RequestCoordinator`] outright. A submitted question is
//! answered on a spawned task, and the [`PendingRequest`] travels with it and
//! comes back through a channel together with the [`AnswerOutcome`], so the
//! coordinator is only ever touched from the loop itself.

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::answer_service::{AnswerOutcome, AnswerService};
use crate::core::conversation::ConversationEvent;
use crate::core::coordinator::{PendingRequest, RequestCoordinator};
use crate::ui::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::ui::renderer::ui;
use crate::utils::scroll::ScrollState;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const PAGE_LINES: usize = 10;

pub type Resolution = (PendingRequest, AnswerOutcome);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Submit,
    Edited,
    Scrolled,
    Ignored,
}

pub struct ChatApp {
    pub coordinator: RequestCoordinator,
    pub scroll: ScrollState,
    pub backend_url: String,
}

impl ChatApp {
    pub fn new(coordinator: RequestCoordinator, backend_url: impl Into<String>) -> Self {
        Self {
            coordinator,
            scroll: ScrollState::default(),
            backend_url: backend_url.into(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Enter => KeyAction::Submit,
            KeyCode::Char(ch) if (key.modifiers - KeyModifiers::SHIFT).is_empty() => {
                self.coordinator.push_input_char(ch);
                KeyAction::Edited
            }
            KeyCode::Backspace => {
                self.coordinator.pop_input_char();
                KeyAction::Edited
            }
            KeyCode::Up => {
                self.scroll.scroll_up(1);
                KeyAction::Scrolled
            }
            KeyCode::Down => {
                self.scroll.scroll_down(1);
                KeyAction::Scrolled
            }
            KeyCode::PageUp => {
                self.scroll.scroll_up(PAGE_LINES);
                KeyAction::Scrolled
            }
            KeyCode::PageDown => {
                self.scroll.scroll_down(PAGE_LINES);
                KeyAction::Scrolled
            }
            KeyCode::End => {
                self.scroll.follow_tail();
                KeyAction::Scrolled
            }
            _ => KeyAction::Ignored,
        }
    }

    /// Pasted text goes into the draft on one line.
    pub fn handle_paste(&mut self, text: &str) {
        let flattened = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
        self.coordinator.push_input_str(&flattened);
    }

    /// Starts a request for the current draft. Returns `false` when the
    /// coordinator dropped the submission.
    pub fn dispatch_pending(
        &mut self,
        service: &Arc<dyn AnswerService>,
        tx: &mpsc::UnboundedSender<Resolution>,
    ) -> bool {
        let Some(request) = self.coordinator.begin_pending() else {
            return false;
        };

        let service = Arc::clone(service);
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = service.ask(request.question()).await;
            // The receiver only goes away when the loop has exited.
            let _ = tx.send((request, outcome));
        });
        true
    }

    /// Applies every finished request. Returns whether anything changed.
    pub fn drain_resolutions(&mut self, rx: &mut mpsc::UnboundedReceiver<Resolution>) -> bool {
        let mut changed = false;
        while let Ok((request, outcome)) = rx.try_recv() {
            self.coordinator.complete(request, outcome);
            changed = true;
        }
        changed
    }

    /// Drains store notifications, snapping back to the newest message when
    /// anything was appended. Returns whether anything was appended.
    pub fn drain_store_events(
        &mut self,
        events: &mut mpsc::UnboundedReceiver<ConversationEvent>,
    ) -> bool {
        let mut appended = false;
        while let Ok(ConversationEvent::Appended { index, .. }) = events.try_recv() {
            debug!(index, "transcript grew");
            appended = true;
        }
        if appended {
            self.scroll.follow_tail();
        }
        appended
    }
}

pub async fn run_chat(
    service: Arc<dyn AnswerService>,
    coordinator: RequestCoordinator,
    backend_url: String,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = setup_terminal()?;
    info!(%backend_url, "chat session started");

    let result = event_loop(&mut terminal, service, ChatApp::new(coordinator, backend_url)).await;

    let restored = restore_terminal(&mut terminal);
    info!("chat session ended");
    session_result(result, restored)
}

/// The terminal is always restored; a loop error wins over a restore error.
fn session_result(
    loop_result: Result<(), Box<dyn Error>>,
    restored: Result<(), Box<dyn Error>>,
) -> Result<(), Box<dyn Error>> {
    loop_result.and(restored)
}

async fn event_loop(
    terminal: &mut ChatTerminal,
    service: Arc<dyn AnswerService>,
    mut app: ChatApp,
) -> Result<(), Box<dyn Error>> {
    let mut store_events = app.coordinator.subscribe();
    let (tx, mut rx) = mpsc::unbounded_channel::<Resolution>();
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| {
                ui(
                    f,
                    app.coordinator.state(),
                    &mut app.scroll,
                    &app.backend_url,
                )
            })?;
            needs_redraw = false;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match app.handle_key(key) {
                        KeyAction::Quit => break,
                        KeyAction::Submit => {
                            needs_redraw |= app.dispatch_pending(&service, &tx);
                        }
                        KeyAction::Edited | KeyAction::Scrolled => needs_redraw = true,
                        KeyAction::Ignored => {}
                    }
                }
                Event::Paste(text) => {
                    app.handle_paste(&text);
                    needs_redraw = true;
                }
                Event::Resize(..) => needs_redraw = true,
                _ => {}
            }
        }

        needs_redraw |= app.drain_resolutions(&mut rx);
        needs_redraw |= app.drain_store_events(&mut store_events);
    }

    Ok(())
}
