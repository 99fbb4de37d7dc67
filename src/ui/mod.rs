//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: polls the terminal, feeds keys to the
//!   [`RequestCoordinator`](crate::core::coordinator::RequestCoordinator) and
//!   applies finished requests.
//! - [`renderer`]: draws the transcript and the input box.
//! - [`lifecycle`]: raw mode and alternate screen setup/teardown.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns the conversation and request state machine.

pub mod chat_loop;
pub mod lifecycle;
pub mod renderer;
