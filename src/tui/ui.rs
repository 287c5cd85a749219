use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::api::client::MODEL_NAME;
use crate::core::controller::ChatController;
use crate::tui::TuiState;
use crate::tui::components::{HistoryPanel, InputBox, MessageList};

/// Width of the history side panel when open.
const HISTORY_PANEL_WIDTH: u16 = 34;

pub fn draw_ui(frame: &mut Frame, controller: &ChatController, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let main_area = if controller.is_history_open {
        let [panel_area, main_area] =
            Layout::horizontal([Length(HISTORY_PANEL_WIDTH), Min(0)]).areas(frame.area());
        HistoryPanel::new(&controller.history, &mut tui.history_panel)
            .render(frame, panel_area);
        main_area
    } else {
        frame.area()
    };

    let input_height = InputBox::calculate_height(&controller.input, main_area.width);
    let [title_area, messages_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(main_area);

    draw_title_bar(frame, title_area, controller);

    MessageList::new(&controller.messages, &mut tui.message_list, controller.is_loading)
        .render(frame, messages_area);

    InputBox::new(&controller.input, controller.is_loading).render(frame, input_area);
}

fn draw_title_bar(frame: &mut Frame, area: Rect, controller: &ChatController) {
    let title = if controller.is_loading {
        format!(" EchoChat (model: {MODEL_NAME}) | waiting for reply")
    } else {
        format!(" EchoChat (model: {MODEL_NAME})")
    };
    frame.render_widget(
        Span::styled(title, Style::default().fg(Color::Gray)),
        area,
    );
}
