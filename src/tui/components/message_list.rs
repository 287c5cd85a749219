//! # Message List Component
//!
//! Scrollable view over the conversation. Messages are rendered into an
//! off-screen buffer at their full height, then the visible window is copied
//! into the frame. Follows the persistent state + transient wrapper pattern:
//! `MessageListState` lives in `TuiState`, `MessageList` is created each
//! frame with borrowed state.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Paragraph, Widget};

use crate::core::chat::Message;
use crate::tui::components::message::MessageView;

/// Persistent scroll state for the message list.
pub struct MessageListState {
    pub scroll: u16,
    /// When true, the view follows the newest message on every frame.
    pub stick_to_bottom: bool,
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            stick_to_bottom: true,
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
        self.stick_to_bottom = false;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        // Clamped against content height at render time
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.stick_to_bottom = true;
    }
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient render wrapper for the conversation view.
pub struct MessageList<'a> {
    messages: &'a [Message],
    state: &'a mut MessageListState,
    is_loading: bool,
}

impl<'a> MessageList<'a> {
    pub fn new(
        messages: &'a [Message],
        state: &'a mut MessageListState,
        is_loading: bool,
    ) -> Self {
        Self {
            messages,
            state,
            is_loading,
        }
    }

    /// Total content height for the current width, including the loading
    /// indicator line when a request is in flight.
    fn content_height(&self, width: u16) -> u16 {
        let messages: u16 = self
            .messages
            .iter()
            .map(|m| MessageView::calculate_height(m, width))
            .sum();
        messages + if self.is_loading { 1 } else { 0 }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.messages.is_empty() && !self.is_loading {
            let hint = Paragraph::new("Type a message and press Enter to start chatting.")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hint, area);
            return;
        }

        let total = self.content_height(area.width);
        let max_scroll = total.saturating_sub(area.height);
        if self.state.stick_to_bottom {
            self.state.scroll = max_scroll;
        } else {
            self.state.scroll = self.state.scroll.min(max_scroll);
            if self.state.scroll == max_scroll {
                self.state.stick_to_bottom = true;
            }
        }

        // Render the full conversation off-screen, then blit the window.
        let mut content = Buffer::empty(Rect::new(0, 0, area.width, total));
        let mut y = 0;
        for message in self.messages {
            let height = MessageView::calculate_height(message, area.width);
            MessageView::new(message).render(Rect::new(0, y, area.width, height), &mut content);
            y += height;
        }
        if self.is_loading {
            Paragraph::new("echogpt is thinking...")
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
                .render(Rect::new(0, y, area.width, 1), &mut content);
        }

        let buf = frame.buffer_mut();
        let visible = area.height.min(total);
        for row in 0..visible {
            for col in 0..area.width {
                buf[(area.x + col, area.y + row)] =
                    content[(col, self.state.scroll + row)].clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(n: usize) -> Vec<Message> {
        (0..n)
            .map(|i| Message::user(i.to_string(), format!("message {i}")))
            .collect()
    }

    #[test]
    fn test_scroll_up_unsticks_from_bottom() {
        let mut state = MessageListState::new();
        assert!(state.stick_to_bottom);
        state.scroll_up(1);
        assert!(!state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_up_saturates_at_zero() {
        let mut state = MessageListState::new();
        state.scroll = 2;
        state.scroll_up(5);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_content_height_includes_loading_line() {
        let msgs = messages(2);
        let mut state = MessageListState::new();
        // Each short message is 3 rows (1 content + 2 borders) at width 80
        let idle = MessageList::new(&msgs, &mut state, false).content_height(80);
        assert_eq!(idle, 6);
        let loading = MessageList::new(&msgs, &mut state, true).content_height(80);
        assert_eq!(loading, 7);
    }
}
