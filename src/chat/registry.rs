//! Live connection registry

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{ChatError, ChatResult};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Frames queued for a connection's writer task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text(String),
    Close,
}

/// Sending half of one participant's connection.
///
/// The writer task owns the socket; everything else talks to it through
/// this handle. Cloning is cheap and every clone refers to the same session.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    participant: String,
    session_id: u64,
    connected_at: i64,
    tx: mpsc::UnboundedSender<Outbound>,
    shutdown: CancellationToken,
}

impl ConnectionHandle {
    pub fn new(participant: impl Into<String>, tx: mpsc::UnboundedSender<Outbound>) -> Self {
        Self {
            participant: participant.into(),
            session_id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            connected_at: chrono::Utc::now().timestamp(),
            tx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Handle plus the receiver its writer task drains
    pub fn channel(participant: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(participant, tx), rx)
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Unix timestamp of when the session was accepted
    pub fn connected_at(&self) -> i64 {
        self.connected_at
    }

    /// Queue a text frame
    pub fn send(&self, text: &str) -> ChatResult<()> {
        if self.shutdown.is_cancelled() {
            return Err(ChatError::ConnectionClosed(self.participant.clone()));
        }
        self.tx
            .send(Outbound::Text(text.to_string()))
            .map_err(|_| ChatError::ConnectionClosed(self.participant.clone()))
    }

    /// Ask the writer to close the socket and stop the session's reader
    pub fn close(&self) {
        self.shutdown.cancel();
        let _ = self.tx.send(Outbound::Close);
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled() || self.tx.is_closed()
    }

    /// Resolves once [`close`](Self::close) has been called on any clone
    pub async fn closed(&self) {
        self.shutdown.cancelled().await
    }
}

/// Participant identity → live connection.
///
/// At most one entry per identity. All access goes through one lock, so a
/// snapshot is a single consistent point in time.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<String, ConnectionHandle>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `id`; returns the superseded handle
    pub fn register(&self, id: &str, connection: ConnectionHandle) -> Option<ConnectionHandle> {
        self.connections.write().insert(id.to_string(), connection)
    }

    /// Remove the entry for `id` if present
    pub fn unregister(&self, id: &str) -> Option<ConnectionHandle> {
        self.connections.write().remove(id)
    }

    /// Remove the entry for `id` only if it still belongs to `session_id`.
    ///
    /// Returns false when the identity has since been taken over by a newer
    /// session (or was already removed).
    pub fn release(&self, id: &str, session_id: u64) -> bool {
        let mut connections = self.connections.write();
        match connections.get(id) {
            Some(current) if current.session_id() == session_id => {
                connections.remove(id);
                true
            }
            _ => false,
        }
    }

    /// Every registered participant except `exclude_id`
    pub fn snapshot_others(&self, exclude_id: &str) -> Vec<(String, ConnectionHandle)> {
        self.connections
            .read()
            .iter()
            .filter(|(id, _)| id.as_str() != exclude_id)
            .map(|(id, handle)| (id.clone(), handle.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.connections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_register_and_snapshot_excludes_sender() {
        let registry = ConnectionRegistry::new();
        let (alice, _rx_a) = ConnectionHandle::channel("alice");
        let (bob, _rx_b) = ConnectionHandle::channel("bob");
        registry.register("alice", alice);
        registry.register("bob", bob);

        let others = registry.snapshot_others("alice");
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].0, "bob");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_register_supersedes() {
        let registry = ConnectionRegistry::new();
        let (first, _rx1) = ConnectionHandle::channel("alice");
        let (second, _rx2) = ConnectionHandle::channel("alice");
        let first_session = first.session_id();
        let second_session = second.session_id();

        assert!(registry.register("alice", first).is_none());
        let superseded = registry.register("alice", second).unwrap();
        assert_eq!(superseded.session_id(), first_session);
        assert_eq!(registry.len(), 1);

        // The old session cannot evict its replacement
        assert!(!registry.release("alice", first_session));
        assert_eq!(registry.len(), 1);
        assert!(registry.release("alice", second_session));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregister_missing_is_noop() {
        let registry = ConnectionRegistry::new();
        assert!(registry.unregister("ghost").is_none());
        assert!(!registry.release("ghost", 1));
    }

    #[test]
    fn test_send_after_close_fails() {
        let (handle, mut rx) = ConnectionHandle::channel("alice");
        handle.send("hi").unwrap();
        handle.close();

        assert!(handle.is_closed());
        assert!(matches!(
            handle.send("again"),
            Err(ChatError::ConnectionClosed(_))
        ));
        assert_eq!(rx.try_recv().unwrap(), Outbound::Text("hi".to_string()));
        assert_eq!(rx.try_recv().unwrap(), Outbound::Close);
    }

    #[test]
    fn test_send_to_dropped_receiver_fails() {
        let (handle, rx) = ConnectionHandle::channel("alice");
        drop(rx);
        assert!(handle.send("hi").is_err());
    }

    #[test]
    fn test_concurrent_register_and_snapshot() {
        let registry = Arc::new(ConnectionRegistry::new());
        let mut receivers = Vec::new();
        let mut handles = Vec::new();
        for i in 0..8 {
            let (handle, rx) = ConnectionHandle::channel(format!("user{}", i));
            receivers.push(rx);
            handles.push(handle);
        }

        let writers: Vec<_> = handles
            .into_iter()
            .map(|handle| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let id = handle.participant().to_string();
                        registry.register(&id, handle.clone());
                        let snapshot = registry.snapshot_others("nobody");
                        let mut ids: Vec<&String> = snapshot.iter().map(|(id, _)| id).collect();
                        let before = ids.len();
                        ids.sort();
                        ids.dedup();
                        assert_eq!(before, ids.len());
                        registry.unregister(&id);
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }
        assert!(registry.is_empty());
    }
}
