//! Scrappy Chat Relay
//!
//! A real-time multi-party chat relay that plays the telephone game: every
//! message is mangled on its way through the server before the other
//! participants see it.
//!
//! # Features
//!
//! - **WebSocket Relay**: One connection per participant, join/leave notices
//! - **Linguistic Scrambling**: Synonym swaps and punctuation chaos scaled by a random silliness
//! - **Emoji Mode**: Messages re-rendered as emoji through the Mistral API
//! - **Graceful Fallback**: Any failed stage delivers the original text instead
//! - **Persistent Log**: Every broadcast line appended to a JSON file
//!
//! # Modules
//!
//! - `types`: Tokens, part-of-speech tags and leaf outcomes
//! - `lexicon`: Tagger, synonym resolver and emoji generator adapters
//! - `scrambler`: The transformation pipeline
//! - `chat`: Connection registry, broadcaster and chat history
//! - `api`: HTTP and WebSocket endpoints
//! - `config`: CLI and environment configuration
//! - `error`: Crate error type
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use scrappy_chat::{create_router, AppState, Config};
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::parse();
//!     let state = Arc::new(AppState::from_config(&config)?);
//!     let app = create_router(state, config.static_dir.clone());
//!     let listener = tokio::net::TcpListener::bind(config.listen_address()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod scrambler;
pub mod types;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use chat::{
    Broadcaster, ChatFrame, ChatHistoryStore, ConnectionHandle, ConnectionRegistry,
    JsonFileHistory, MemoryHistory, Outbound, SessionState,
};
pub use config::Config;
pub use error::{ChatError, ChatResult};
pub use scrambler::{Draw, Mode, Scrambled, Scrambler, ScramblerSettings};
pub use types::{Outcome, PartOfSpeech, TaggedWord, Token};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
