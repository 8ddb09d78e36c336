//! Chat relay core
//!
//! - `registry`: participant identity → live connection
//! - `broadcaster`: session state machine and fan-out
//! - `frame`: `<username>:<content>` wire format and system notices
//! - `history`: append-only chat log

pub mod broadcaster;
pub mod frame;
pub mod history;
pub mod registry;

pub use broadcaster::{Broadcaster, SessionState};
pub use frame::{join_notice, leave_notice, ChatFrame, SYSTEM_SENDER};
pub use history::{ChatHistoryStore, JsonFileHistory, MemoryHistory};
pub use registry::{ConnectionHandle, ConnectionRegistry, Outbound};
