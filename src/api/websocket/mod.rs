//! WebSocket module for the chat relay
//!
//! Provides the endpoint at `/ws/:participant`. Each connection is one
//! participant session: join notice on accept, scrambled fan-out of every
//! `<username>:<content>` frame, leave notice on close.

pub mod handler;
pub mod state;

pub use handler::ws_handler;
pub use state::AppState;
