//! Conversation state and the logic that drives it.
//!
//! - [`conversation`] is the append-only transcript with change notification.
//! - [`coordinator`] gates submissions and turns service replies into
//!   transcript entries.
//! - [`answer_service`] is the seam between the coordinator and whatever
//!   answers questions; [`crate::api::client`] provides the HTTP one.

pub mod answer_service;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod coordinator;
pub mod message;
