//! Hiroba group chat server library.
//!
//! Tracks who is online, fans out chat events over WebSocket and replays
//! persisted history to newly joined clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
