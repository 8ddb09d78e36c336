//! End-to-end tests for the chat relay

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;

use scrappy_chat::lexicon::{EmojiGenerator, RuleTagger, SynonymResolver};
use scrappy_chat::{
    Broadcaster, ChatHistoryStore, ChatResult, ConnectionHandle, MemoryHistory, Outbound, Outcome,
    PartOfSpeech, Scrambler, ScramblerSettings, SessionState,
};

const WAIT: Duration = Duration::from_secs(2);

struct Uppercasing;

#[async_trait]
impl SynonymResolver for Uppercasing {
    async fn resolve(&self, word: &str, _tag: PartOfSpeech) -> Outcome {
        Outcome::Replaced(word.to_uppercase())
    }
}

struct AlwaysFails;

#[async_trait]
impl SynonymResolver for AlwaysFails {
    async fn resolve(&self, word: &str, _tag: PartOfSpeech) -> Outcome {
        Outcome::failed(word, "thesaurus offline")
    }
}

struct FixedEmoji;

#[async_trait]
impl EmojiGenerator for FixedEmoji {
    async fn generate(&self, _text: &str) -> Outcome {
        Outcome::Replaced("👋🌍".to_string())
    }
}

fn relay(
    synonyms: Arc<dyn SynonymResolver>,
    linguistic_probability: f64,
) -> (Arc<Broadcaster>, Arc<MemoryHistory>) {
    let scrambler = Arc::new(Scrambler::new(
        Arc::new(RuleTagger::new()),
        synonyms,
        Arc::new(FixedEmoji),
        ScramblerSettings {
            linguistic_probability,
            leaf_timeout: Duration::from_secs(1),
        },
    ));
    let history = Arc::new(MemoryHistory::new());
    (Arc::new(Broadcaster::new(scrambler, history.clone())), history)
}

/// One simulated client: its inbound sender, outbound receiver and session task
struct Client {
    handle: ConnectionHandle,
    inbound: mpsc::UnboundedSender<ChatResult<String>>,
    outbound: mpsc::UnboundedReceiver<Outbound>,
    session: JoinHandle<SessionState>,
}

impl Client {
    fn send(&self, raw: &str) {
        self.inbound.send(Ok(raw.to_string())).unwrap();
    }

    async fn next_text(&mut self) -> String {
        match tokio::time::timeout(WAIT, self.outbound.recv()).await {
            Ok(Some(Outbound::Text(text))) => text,
            other => panic!("expected a text frame, got {:?}", other),
        }
    }

    /// Nothing queued after giving in-flight work a moment to land
    async fn assert_quiet(&mut self) {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(
            self.outbound.try_recv().is_err(),
            "unexpected frame for {}",
            self.handle.participant()
        );
    }
}

async fn connect(broadcaster: &Arc<Broadcaster>, participant: &str) -> Client {
    let (handle, outbound) = ConnectionHandle::channel(participant);
    let (inbound, inbound_rx) = mpsc::unbounded_channel();
    let session_id = handle.session_id();

    let relay = broadcaster.clone();
    let connection = handle.clone();
    let session = tokio::spawn(async move {
        relay
            .run_session(connection, UnboundedReceiverStream::new(inbound_rx))
            .await
    });

    // Wait until this session owns the registry entry
    let registered = async {
        loop {
            let ours = broadcaster
                .registry()
                .snapshot_others("")
                .iter()
                .any(|(id, conn)| id == participant && conn.session_id() == session_id);
            if ours {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };
    tokio::time::timeout(WAIT, registered).await.unwrap();

    Client {
        handle,
        inbound,
        outbound,
        session,
    }
}

#[tokio::test]
async fn test_join_notice_goes_to_others_only() {
    let (broadcaster, history) = relay(Arc::new(Uppercasing), 1.0);
    let mut alice = connect(&broadcaster, "alice").await;
    let mut bob = connect(&broadcaster, "bob").await;

    assert_eq!(alice.next_text().await, "SYSTEM:bob has joined the chat");
    bob.assert_quiet().await;

    // System notices are not logged
    assert!(history.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_message_reaches_others_with_token_count_preserved() {
    let (broadcaster, history) = relay(Arc::new(Uppercasing), 1.0);
    let mut alice = connect(&broadcaster, "alice").await;
    let mut bob = connect(&broadcaster, "bob").await;
    alice.next_text().await; // bob's join notice

    alice.send("alice:hello world");

    let received = bob.next_text().await;
    let content = received.strip_prefix("alice:").unwrap();
    let words: Vec<&str> = content.split_whitespace().collect();
    assert_eq!(words.len(), 2);
    assert!(words[0].eq_ignore_ascii_case("hello"));
    assert!(words[1].eq_ignore_ascii_case("world"));

    alice.assert_quiet().await;
    assert_eq!(history.load_all().await.unwrap(), vec![received]);
}

#[tokio::test]
async fn test_emoji_route_delivers_generated_emoji() {
    let (broadcaster, _history) = relay(Arc::new(Uppercasing), 0.0);
    let alice = connect(&broadcaster, "alice").await;
    let mut bob = connect(&broadcaster, "bob").await;

    alice.send("alice:hello world");

    assert_eq!(bob.next_text().await, "alice:👋🌍");
}

#[tokio::test]
async fn test_leave_notice_and_no_late_send() {
    let (broadcaster, history) = relay(Arc::new(Uppercasing), 1.0);
    let mut alice = connect(&broadcaster, "alice").await;
    let mut carol = connect(&broadcaster, "carol").await;
    let bob = connect(&broadcaster, "bob").await;
    alice.next_text().await; // carol joined
    alice.next_text().await; // bob joined
    carol.next_text().await; // bob joined

    bob.handle.close();
    assert_eq!(bob.session.await.unwrap(), SessionState::Closed);

    assert_eq!(alice.next_text().await, "SYSTEM:bob has left the chat");
    assert_eq!(carol.next_text().await, "SYSTEM:bob has left the chat");
    alice.assert_quiet().await;
    carol.assert_quiet().await;
    assert_eq!(broadcaster.registry().len(), 2);

    // The session is gone, so nothing picks this up
    let _ = bob.inbound.send(Ok("bob:too late".to_string()));
    tokio::time::sleep(Duration::from_millis(100)).await;
    let entries = history.load_all().await.unwrap();
    assert!(entries.iter().all(|line| !line.starts_with("bob:")));
}

#[tokio::test]
async fn test_client_disconnect_announces_leave() {
    let (broadcaster, _history) = relay(Arc::new(Uppercasing), 1.0);
    let mut alice = connect(&broadcaster, "alice").await;
    let bob = connect(&broadcaster, "bob").await;
    alice.next_text().await;

    drop(bob.inbound);
    assert_eq!(bob.session.await.unwrap(), SessionState::Closed);

    assert_eq!(alice.next_text().await, "SYSTEM:bob has left the chat");
    assert_eq!(broadcaster.registry().len(), 1);
}

#[tokio::test]
async fn test_failing_resolver_keeps_original_words() {
    let (broadcaster, history) = relay(Arc::new(AlwaysFails), 1.0);
    let alice = connect(&broadcaster, "alice").await;
    let mut bob = connect(&broadcaster, "bob").await;

    alice.send("alice:happy dog");

    assert_eq!(bob.next_text().await, "alice:happy dog");
    assert_eq!(history.load_all().await.unwrap(), vec!["alice:happy dog"]);
}

#[tokio::test]
async fn test_frame_without_separator_is_dropped() {
    let (broadcaster, history) = relay(Arc::new(Uppercasing), 1.0);
    let alice = connect(&broadcaster, "alice").await;
    let mut bob = connect(&broadcaster, "bob").await;

    alice.send("no separator here");

    bob.assert_quiet().await;
    assert!(history.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_join_supersedes_previous_session() {
    let (broadcaster, _history) = relay(Arc::new(Uppercasing), 1.0);
    let mut bob = connect(&broadcaster, "bob").await;
    let mut first = connect(&broadcaster, "alice").await;
    assert_eq!(bob.next_text().await, "SYSTEM:alice has joined the chat");

    let _second = connect(&broadcaster, "alice").await;

    // The old connection is told to close and its session ends quietly
    let closed = tokio::time::timeout(WAIT, async {
        while let Some(frame) = first.outbound.recv().await {
            if frame == Outbound::Close {
                return true;
            }
        }
        false
    })
    .await
    .unwrap();
    assert!(closed);
    assert_eq!(first.session.await.unwrap(), SessionState::Closed);

    assert_eq!(bob.next_text().await, "SYSTEM:alice has joined the chat");
    bob.assert_quiet().await;
    assert_eq!(broadcaster.registry().len(), 2);
}

#[tokio::test]
async fn test_history_follows_broadcast_order() {
    let (broadcaster, history) = relay(Arc::new(AlwaysFails), 1.0);
    let alice = connect(&broadcaster, "alice").await;
    let mut bob = connect(&broadcaster, "bob").await;

    alice.send("alice:one");
    alice.send("alice:two");
    alice.send("alice:three");

    let mut received = Vec::new();
    for _ in 0..3 {
        received.push(bob.next_text().await);
    }
    assert_eq!(received, vec!["alice:one", "alice:two", "alice:three"]);
    assert_eq!(history.load_all().await.unwrap(), received);
}

#[tokio::test]
async fn test_read_error_ends_session() {
    let (broadcaster, _history) = relay(Arc::new(Uppercasing), 1.0);
    let mut alice = connect(&broadcaster, "alice").await;
    let bob = connect(&broadcaster, "bob").await;
    alice.next_text().await;

    bob.inbound
        .send(Err(scrappy_chat::ChatError::ConnectionClosed("bob".to_string())))
        .unwrap();
    assert_eq!(bob.session.await.unwrap(), SessionState::Closed);
    assert_eq!(alice.next_text().await, "SYSTEM:bob has left the chat");
}

#[tokio::test]
async fn test_dead_recipient_does_not_stall_sender() {
    let (broadcaster, history) = relay(Arc::new(AlwaysFails), 1.0);
    let alice = connect(&broadcaster, "alice").await;
    let carol = connect(&broadcaster, "carol").await;
    let mut bob = connect(&broadcaster, "bob").await;

    // Carol's writer is gone but her session is still registered
    drop(carol.outbound);

    alice.send("alice:first");
    assert_eq!(bob.next_text().await, "alice:first");
    assert!(!alice.session.is_finished());

    alice.send("alice:second");
    assert_eq!(bob.next_text().await, "alice:second");
    assert!(!alice.session.is_finished());

    assert_eq!(broadcaster.registry().len(), 3);
    assert_eq!(
        history.load_all().await.unwrap(),
        vec!["alice:first", "alice:second"]
    );
}
