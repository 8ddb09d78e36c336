//! Per-participant sessions and fan-out

use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::frame::{join_notice, leave_notice, ChatFrame};
use super::history::ChatHistoryStore;
use super::registry::{ConnectionHandle, ConnectionRegistry};
use crate::error::ChatResult;
use crate::scrambler::Scrambler;

/// Lifecycle of one participant session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

/// Owns the registry, runs every session's receive loop and fans
/// scrambled messages out to everyone but the sender.
pub struct Broadcaster {
    registry: ConnectionRegistry,
    scrambler: Arc<Scrambler>,
    history: Arc<dyn ChatHistoryStore>,
    /// Held across fan-out and history append so the log matches broadcast order
    delivery: Mutex<()>,
}

impl Broadcaster {
    pub fn new(scrambler: Arc<Scrambler>, history: Arc<dyn ChatHistoryStore>) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            scrambler,
            history,
            delivery: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn history(&self) -> &Arc<dyn ChatHistoryStore> {
        &self.history
    }

    /// Drive one session from handshake to close.
    ///
    /// `inbound` yields text frames until the client goes away. The session
    /// also ends when `connection` is closed because a newer session took
    /// over the same identity.
    pub async fn run_session<S>(&self, connection: ConnectionHandle, inbound: S) -> SessionState
    where
        S: Stream<Item = ChatResult<String>> + Send,
    {
        let mut state = SessionState::Connecting;
        debug!(participant = connection.participant(), ?state, "session accepted");

        state = self.open(&connection);
        let participant = connection.participant().to_string();
        debug!(participant = %participant, ?state, "session open");

        let mut inbound = std::pin::pin!(inbound);
        loop {
            tokio::select! {
                _ = connection.closed() => {
                    debug!(participant = %participant, "session superseded");
                    break;
                }
                frame = inbound.next() => match frame {
                    Some(Ok(text)) => {
                        self.handle_frame(&participant, &text).await;
                    }
                    Some(Err(e)) => {
                        warn!(participant = %participant, error = %e, "connection error");
                        break;
                    }
                    None => break,
                }
            }
        }

        state = SessionState::Closing;
        debug!(participant = %participant, ?state, "session closing");
        self.close(&connection);
        SessionState::Closed
    }

    /// Register the connection and announce it to everyone else
    fn open(&self, connection: &ConnectionHandle) -> SessionState {
        let participant = connection.participant();
        if let Some(superseded) = self.registry.register(participant, connection.clone()) {
            info!(
                participant,
                superseded_session = superseded.session_id(),
                "duplicate join, closing previous connection"
            );
            superseded.close();
        }

        info!(
            participant,
            session = connection.session_id(),
            participants = self.registry.len(),
            "participant joined"
        );
        self.fan_out(participant, &join_notice(participant));
        SessionState::Open
    }

    /// Unregister the connection and announce the departure
    fn close(&self, connection: &ConnectionHandle) {
        let participant = connection.participant();
        let released = self
            .registry
            .release(participant, connection.session_id());
        connection.close();

        if released {
            let seconds = chrono::Utc::now().timestamp() - connection.connected_at();
            info!(
                participant,
                session = connection.session_id(),
                seconds,
                "participant left"
            );
            self.fan_out(participant, &leave_notice(participant));
        } else {
            debug!(
                participant,
                session = connection.session_id(),
                "session ended after being superseded"
            );
        }
    }

    /// Scramble one inbound frame and deliver it.
    ///
    /// Returns the broadcast line, or `None` for a malformed frame.
    pub async fn handle_frame(&self, sender: &str, raw: &str) -> Option<String> {
        let Some(frame) = ChatFrame::parse(raw) else {
            debug!(participant = sender, "dropping frame without separator");
            return None;
        };

        let scrambled = self.scrambler.scramble(&frame.content).await;
        debug!(
            participant = sender,
            mode = ?scrambled.mode,
            fell_back = scrambled.fell_back,
            "message scrambled"
        );

        let line = ChatFrame::new(frame.username, scrambled.text).encode();
        self.deliver(sender, &line).await;
        Some(line)
    }

    async fn deliver(&self, sender: &str, line: &str) {
        let _order = self.delivery.lock().await;
        let recipients = self.fan_out(sender, line);
        debug!(participant = sender, recipients, "message broadcast");

        if let Err(e) = self.history.append(line.to_string()).await {
            error!(participant = sender, error = %e, "failed to append chat history");
        }
    }

    /// Send `line` to every registered participant except `sender`.
    ///
    /// A failed send is logged and skipped. Returns the number of
    /// successful sends.
    pub fn fan_out(&self, sender: &str, line: &str) -> usize {
        let mut delivered = 0;
        for (recipient, connection) in self.registry.snapshot_others(sender) {
            match connection.send(line) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(recipient = %recipient, error = %e, "failed to deliver frame");
                }
            }
        }
        delivered
    }
}
