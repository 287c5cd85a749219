//! # TUI Components
//!
//! Presentation components for the terminal interface. Two patterns:
//!
//! - **Stateless (props-based)**: created fresh each frame with the data
//!   they render (`MessageView`, `InputBox`).
//! - **Persistent state + transient wrapper**: scroll/selection state lives
//!   in `TuiState`, a wrapper borrows it for one frame (`MessageList`,
//!   `HistoryPanel`).
//!
//! Components receive external data as parameters, never by reaching into
//! global state, so their dependencies stay explicit and testable.

pub mod history_panel;
pub mod input_box;
pub mod message;
pub mod message_list;

pub use history_panel::{HistoryPanel, HistoryPanelState};
pub use input_box::InputBox;
pub use message::MessageView;
pub use message_list::{MessageList, MessageListState};
