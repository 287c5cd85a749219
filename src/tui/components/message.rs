use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::chat::{Message, Role};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat message with role-based
/// styling. Created fresh each frame with the data it needs; holds no state.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Calculate the height required for this message given a width.
    ///
    /// Uses `textwrap` to predict the wrapped height without rendering, so
    /// the parent list can compute scroll positions up front. The wrapping
    /// options must match the Ratatui default for `Paragraph` to keep the
    /// calculated and actual heights in lockstep.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = message.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let role = match self.message.role {
            Role::User => "you",
            Role::Assistant => "echogpt",
        };

        let style = match self.message.role {
            Role::User => Style::default().fg(Color::Green),
            Role::Assistant => Style::default().fg(Color::Blue),
        };
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(role)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.content.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_message(role: Role, content: &str) -> Message {
        match role {
            Role::User => Message::user("1".to_string(), content.to_string()),
            Role::Assistant => Message::assistant("1".to_string(), content.to_string()),
        }
    }

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        let message = make_message(Role::User, "");
        assert_eq!(MessageView::calculate_height(&message, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_whitespace_only_treated_as_empty() {
        let message = make_message(Role::User, "   \n\t  ");
        assert_eq!(MessageView::calculate_height(&message, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let message = make_message(Role::User, "Hello world");
        assert_eq!(MessageView::calculate_height(&message, 0), 1);
    }

    #[test]
    fn calculate_height_single_line_fits() {
        let message = make_message(Role::User, "Hello");
        assert_eq!(
            MessageView::calculate_height(&message, 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        // "Hello world" = 11 chars, width 9 -> content_width = 5
        // Wraps to: "Hello" | "world" = 2 lines
        let message = make_message(Role::User, "Hello world");
        assert_eq!(
            MessageView::calculate_height(&message, 9),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_breaks_long_words() {
        // "abcdefghij" = 10 chars, width 8 -> content_width = 4
        // Breaks to: "abcd" | "efgh" | "ij" = 3 lines
        let message = make_message(Role::Assistant, "abcdefghij");
        assert_eq!(
            MessageView::calculate_height(&message, 8),
            3 + VERTICAL_OVERHEAD
        );
    }
}
