//! # Core Application Logic
//!
//! EchoChat's business logic. It knows nothing about any specific UI
//! technology: the TUI adapter reads the controller and calls its
//! transitions, nothing more.
//!
//! ## Modules
//!
//! - [`chat`]: the `Message` and `ChatHistory` records
//! - [`controller`]: the `ChatController` state holder and its transitions
//! - [`config`]: config file + env resolution

pub mod chat;
pub mod config;
pub mod controller;
