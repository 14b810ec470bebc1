//! Real-time chat session hub.
//!
//! Tracks who is connected, relays chat messages and typing signals between
//! sessions, and replays recent history to newly joined sessions.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
