//! Text frame wire format
//!
//! Chat lines are `<username>:<content>`; system notices use the
//! reserved `SYSTEM` username.

/// Username used for join/leave notices
pub const SYSTEM_SENDER: &str = "SYSTEM";

/// One chat line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatFrame {
    pub username: String,
    pub content: String,
}

impl ChatFrame {
    pub fn new(username: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            content: content.into(),
        }
    }

    /// Split at the first colon; frames without one are rejected
    pub fn parse(raw: &str) -> Option<Self> {
        let (username, content) = raw.split_once(':')?;
        Some(Self::new(username, content))
    }

    pub fn encode(&self) -> String {
        format!("{}:{}", self.username, self.content)
    }
}

pub fn join_notice(participant: &str) -> String {
    ChatFrame::new(SYSTEM_SENDER, format!("{} has joined the chat", participant)).encode()
}

pub fn leave_notice(participant: &str) -> String {
    ChatFrame::new(SYSTEM_SENDER, format!("{} has left the chat", participant)).encode()
}
