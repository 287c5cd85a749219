//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into controller transitions.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! completion request runs on a spawned tokio task so the event loop keeps
//! polling while the retrying invoker sleeps between attempts; the settled
//! result comes back over an mpsc channel and is applied to the controller
//! on the loop's own thread. All shared state is mutated here only.

mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{info, warn};

use crate::api::client::{ApiError, ChatClient, EchoGptClient};
use crate::core::config::ResolvedConfig;
use crate::core::controller::{ChatController, PendingSend};
use crate::tui::components::{HistoryPanelState, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub history_panel: HistoryPanelState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            history_panel: HistoryPanelState::new(),
        }
    }
}

/// The settled result of a send, reported back from the spawned task.
struct SendOutcome {
    pending: PendingSend,
    result: Result<String, ApiError>,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // The kitty keyboard protocol makes Shift+Enter distinguishable from
        // Enter; terminals without it ignore the flags harmlessly.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = Arc::new(
        EchoGptClient::new(config.api_key.clone(), config.base_url.clone()).with_retry_policy(
            config.max_retries,
            Duration::from_millis(config.initial_delay_ms),
        ),
    );
    let mut controller = ChatController::new();
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for settled sends from background tasks
    let (tx, rx) = mpsc::channel::<SendOutcome>();

    let mut should_quit = false;

    loop {
        terminal.draw(|f| ui::draw_ui(f, &controller, &mut tui))?;

        // Process first event + drain all pending events before next draw
        let first_event = poll_event_timeout(Duration::from_millis(100));
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Quit => {
                    // Esc closes the panel first, then quits
                    if controller.is_history_open {
                        controller.is_history_open = false;
                    } else {
                        should_quit = true;
                    }
                }
                TuiEvent::Resize => {}
                TuiEvent::ToggleHistory => {
                    controller.is_history_open = !controller.is_history_open;
                    tui.history_panel.clamp(controller.history.len());
                }
                TuiEvent::NewChat => {
                    controller.start_new_chat();
                    tui.message_list.scroll_to_bottom();
                }
                TuiEvent::Submit => {
                    if controller.is_history_open {
                        let selected = tui.history_panel.selected;
                        if let Some(entry) = controller.history.get(selected).cloned() {
                            controller.load_chat_history(&entry);
                            tui.message_list.scroll_to_bottom();
                        }
                    } else {
                        spawn_send(&mut controller, client.clone(), tx.clone());
                    }
                }
                // The input element is disabled while a request is in flight
                TuiEvent::InputChar(c) => {
                    if !controller.is_loading && !controller.is_history_open {
                        controller.input.push(c);
                    }
                }
                TuiEvent::Paste(data) => {
                    if !controller.is_loading && !controller.is_history_open {
                        controller.input.push_str(&data);
                    }
                }
                TuiEvent::Backspace => {
                    if !controller.is_loading && !controller.is_history_open {
                        controller.input.pop();
                    }
                }
                TuiEvent::CursorUp => {
                    if controller.is_history_open {
                        tui.history_panel.select_prev();
                    } else {
                        tui.message_list.scroll_up(1);
                    }
                }
                TuiEvent::CursorDown => {
                    if controller.is_history_open {
                        tui.history_panel.select_next(controller.history.len());
                    } else {
                        tui.message_list.scroll_down(1);
                    }
                }
                TuiEvent::ScrollUp => tui.message_list.scroll_up(3),
                TuiEvent::ScrollDown => tui.message_list.scroll_down(3),
            }
        }

        // Apply settled sends from background tasks
        while let Ok(SendOutcome { pending, result }) = rx.try_recv() {
            controller.complete_send(pending, result);
            tui.message_list.scroll_to_bottom();
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Start a send if the controller's preconditions allow it, running the
/// client call (including backoff sleeps) off the event loop.
fn spawn_send(
    controller: &mut ChatController,
    client: Arc<EchoGptClient>,
    tx: mpsc::Sender<SendOutcome>,
) {
    let Some(pending) = controller.begin_send() else {
        return;
    };
    info!("Spawning completion request (id={})", pending.id);

    tokio::spawn(async move {
        let result = client.complete(&pending.text).await;
        if tx.send(SendOutcome { pending, result }).is_err() {
            warn!("Completion result dropped: receiver closed");
        }
    });
}
