//! API module for HTTP and WebSocket endpoints
//!
//! This module provides the chat WebSocket, the history endpoint and
//! optional static asset serving for the web client.

pub mod http;
pub mod rest;
pub mod websocket;

pub use http::create_router;
pub use websocket::AppState;
