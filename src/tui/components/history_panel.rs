//! # History Panel Component
//!
//! Side panel listing past conversations, newest first. Toggled with
//! Ctrl+O; Up/Down move the selection and Enter loads the selected entry.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `HistoryPanelState` lives in `TuiState`
//! - `HistoryPanel` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::chat::ChatHistory;

/// Persistent state for the history panel.
pub struct HistoryPanelState {
    pub selected: usize,
    pub list_state: ListState,
}

impl HistoryPanelState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    /// Keep the selection valid after the history list changes.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(len - 1);
        }
    }
}

impl Default for HistoryPanelState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient render wrapper for the history side panel.
pub struct HistoryPanel<'a> {
    entries: &'a [ChatHistory],
    state: &'a mut HistoryPanelState,
}

impl<'a> HistoryPanel<'a> {
    pub fn new(entries: &'a [ChatHistory], state: &'a mut HistoryPanelState) -> Self {
        Self { entries, state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" History ")
            .title_bottom(Line::from(" Enter Open  Ctrl+N New ").centered())
            .padding(Padding::horizontal(1));

        if self.entries.is_empty() {
            let empty = Paragraph::new("No past conversations.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        self.state.clamp(self.entries.len());
        self.state.list_state.select(Some(self.state.selected));

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let date = entry.timestamp.format("%b %d %H:%M").to_string();
                ListItem::new(vec![
                    Line::from(Span::styled(
                        entry.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        entry.last_message.clone(),
                        Style::default().fg(Color::Gray),
                    )),
                    Line::from(Span::styled(date, Style::default().fg(Color::DarkGray))),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
