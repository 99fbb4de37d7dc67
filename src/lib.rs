//! rentalqa is a terminal chat client for a car-rental Q&A service.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation, the one-question-at-a-time request state
//!   machine, and configuration.
//! - [`api`] defines the wire payloads and the HTTP client for the answering
//!   service.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`utils`] holds URL handling, scrolling and text wrapping, and logging
//!   setup.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`ui::chat_loop`] for
//! interactive sessions.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
