//! # Input Box Component
//!
//! Renders the controller's input text. The component is a pure function of
//! its props: the text lives in `ChatController`, editing happens in the
//! event loop. Enter submits; Shift+Enter inserts a newline, so the box
//! grows with its content.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

/// Horizontal padding (per side) inside the border.
const CONTENT_PAD_H: u16 = 1;
/// Borders plus padding on both sides.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Top and bottom borders.
const VERTICAL_OVERHEAD: u16 = 2;

#[derive(Clone, Copy)]
pub struct InputBox<'a> {
    pub text: &'a str,
    pub is_loading: bool,
}

impl<'a> InputBox<'a> {
    pub fn new(text: &'a str, is_loading: bool) -> Self {
        Self { text, is_loading }
    }

    /// Wrapped height of the input text plus borders. Each hard newline
    /// starts a fresh line; long lines wrap at the content width.
    pub fn calculate_height(text: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines: u16 = text
            .split('\n')
            .map(|line| textwrap::wrap(line, &options).len().max(1) as u16)
            .sum();
        lines.max(1) + VERTICAL_OVERHEAD
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hint = if self.is_loading {
            " waiting for reply... "
        } else {
            " Enter send | Shift+Enter newline | Ctrl+O history | Esc quit "
        };

        let border_style = if self.is_loading {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_style(border_style)
            .title_bottom(Line::from(hint).centered())
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        let paragraph = Paragraph::new(self.text)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, area);

        // Put the terminal cursor after the last character. Approximate for
        // wrapped lines: column is the width of the last hard line modulo
        // the content width.
        if !self.is_loading && inner.width > 0 {
            let last_line = self.text.rsplit('\n').next().unwrap_or("");
            let col = (UnicodeWidthStr::width(last_line) as u16) % inner.width;
            let row = Self::calculate_height(self.text, area.width)
                .saturating_sub(VERTICAL_OVERHEAD)
                .saturating_sub(1);
            frame.set_cursor_position(Position::new(
                inner.x + col,
                (inner.y + row).min(inner.y + inner.height.saturating_sub(1)),
            ));
        }
    }
}
