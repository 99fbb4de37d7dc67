use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::coordinator::ConversationState;
use crate::core::message::{Message, Sender};
use crate::utils::scroll::{visible_tail, wrap_text, ScrollState};

/// Width of the "You: " / "Bot: " gutter.
const PREFIX_WIDTH: usize = 5;

const INPUT_TITLE: &str = "Type your question (Enter to send, Ctrl+C to quit)";
const AWAITING_TITLE: &str = "Waiting for an answer ...";

fn prefix_style(sender: Sender) -> Style {
    let color = match sender {
        Sender::User => Color::Cyan,
        Sender::Bot => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn text_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Cyan),
        Sender::Bot => Style::default(),
    }
}

/// Transcript lines pre-wrapped to `width` columns so the line count matches
/// what ends up on screen.
pub fn build_transcript_lines(messages: &[Message], width: u16) -> Vec<Line<'static>> {
    let text_width = (width as usize).saturating_sub(PREFIX_WIDTH).max(1);
    let mut lines = Vec::new();

    for message in messages {
        let sender = message.sender();
        for (row, chunk) in wrap_text(message.text(), text_width)
            .into_iter()
            .enumerate()
        {
            let gutter = if row == 0 {
                Span::styled(format!("{}: ", sender.label()), prefix_style(sender))
            } else {
                Span::raw(" ".repeat(PREFIX_WIDTH))
            };
            lines.push(Line::from(vec![
                gutter,
                Span::styled(chunk, text_style(sender)),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines
}

pub fn ui(f: &mut Frame, state: &ConversationState, scroll: &mut ScrollState, backend_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    render_transcript(f, chunks[0], state, scroll, backend_url);
    render_input(f, chunks[1], state);
}

fn render_transcript(
    f: &mut Frame,
    area: Rect,
    state: &ConversationState,
    scroll: &mut ScrollState,
    backend_url: &str,
) {
    let lines = build_transcript_lines(state.messages(), area.width);
    // One row is taken by the title.
    let viewport_height = area.height.saturating_sub(1) as usize;
    let top = scroll.top_line(lines.len(), viewport_height);

    let title = format!(
        "rentalqa v{} - {}",
        env!("CARGO_PKG_VERSION"),
        backend_url
    );
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(title))
        .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0));

    f.render_widget(paragraph, area);
}

fn render_input(f: &mut Frame, area: Rect, state: &ConversationState) {
    let awaiting = state.awaiting_response();
    let (title, style) = if awaiting {
        (AWAITING_TITLE, Style::default().fg(Color::DarkGray))
    } else {
        (INPUT_TITLE, Style::default().fg(Color::Yellow))
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    // Leave a column for the cursor.
    let shown = visible_tail(state.pending_input(), inner_width.saturating_sub(1));

    let input = Paragraph::new(shown.to_string())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);

    if !awaiting {
        let cursor_x = area.x + 1 + UnicodeWidthStr::width(shown) as u16;
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinator::RequestCoordinator;
    use crate::core::constants::GREETING_TEXT;
    use crate::core::answer_service::AnswerOutcome;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(coordinator: &RequestCoordinator, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        let mut scroll = ScrollState::default();
        terminal
            .draw(|f| ui(f, coordinator.state(), &mut scroll, "http://localhost:8000"))
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn transcript_lines_prefix_each_message() {
        let messages = vec![Message::bot("Hi"), Message::user("Fuel policy?")];
        let lines = build_transcript_lines(&messages, 40);

        let rendered: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
        assert_eq!(rendered, vec!["Bot: Hi", "", "You: Fuel policy?", ""]);
    }

    #[test]
    fn wrapped_rows_are_indented_under_the_gutter() {
        let messages = vec![Message::bot("Deposit: held on your card")];
        let lines = build_transcript_lines(&messages, 5 + 13);

        let rendered: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["Bot: Deposit: held", "     on your card", ""]
        );
    }

    #[test]
    fn draws_greeting_and_input_prompt() {
        let coordinator = RequestCoordinator::new();
        let screen = render(&coordinator, 80, 10);

        assert!(screen.contains(&format!("Bot: {GREETING_TEXT}")));
        assert!(screen.contains(INPUT_TITLE));
        assert!(screen.contains("http://localhost:8000"));
    }

    #[test]
    fn awaiting_state_shows_waiting_title() {
        let mut coordinator = RequestCoordinator::new();
        let request = coordinator.begin("Is GPS included?").expect("accepted");

        let screen = render(&coordinator, 80, 10);

        assert!(screen.contains("You: Is GPS included?"));
        assert!(screen.contains(AWAITING_TITLE));
        assert!(!screen.contains(INPUT_TITLE));
        coordinator.complete(request, AnswerOutcome::Empty);
    }

    #[test]
    fn long_history_keeps_latest_message_in_view() {
        let mut coordinator = RequestCoordinator::new();
        for index in 0..20 {
            let request = coordinator
                .begin(&format!("question {index}"))
                .expect("accepted");
            coordinator.complete(request, AnswerOutcome::Empty);
        }

        let screen = render(&coordinator, 60, 12);

        assert!(screen.contains("You: question 19"));
        assert!(!screen.contains(GREETING_TEXT));
    }

    #[test]
    fn draft_is_shown_in_input_box() {
        let mut coordinator = RequestCoordinator::new();
        coordinator.set_pending_input("Can I add a driver?");

        let screen = render(&coordinator, 60, 8);

        assert!(screen.contains("Can I add a driver?"));
    }
}
