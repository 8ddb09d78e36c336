//! Phase 3: concurrent synonym resolution

use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

use crate::error::{ChatError, ChatResult};
use crate::lexicon::SynonymResolver;
use crate::types::{Outcome, Token};

/// Resolve one token, treating a timeout like any other lookup failure
async fn resolve_token(resolver: &dyn SynonymResolver, token: &Token, limit: Duration) -> Outcome {
    match tokio::time::timeout(limit, resolver.resolve(token.text(), token.tag())).await {
        Ok(outcome) => outcome,
        Err(_) => Outcome::failed(
            token.text(),
            format!("synonym lookup timed out after {}ms", limit.as_millis()),
        ),
    }
}

/// Replace every marked content word with a synonym.
///
/// Lookups run concurrently and may finish in any order. Each result is
/// written into a slot indexed by the token's position, so the returned
/// sequence is in position order and has the input's length.
pub async fn resolve_synonyms(
    tokens: Vec<Token>,
    resolver: &dyn SynonymResolver,
    limit: Duration,
) -> ChatResult<Vec<Token>> {
    let len = tokens.len();
    let mut slots: Vec<Option<Token>> = vec![None; len];
    let mut pending = FuturesUnordered::new();

    for token in tokens {
        let position = token.position();
        if position >= len {
            return Err(ChatError::Pipeline(format!(
                "token position {} outside message of {} tokens",
                position, len
            )));
        }

        if token.is_marked() && token.tag().is_content_word() {
            pending.push(async move {
                let outcome = resolve_token(resolver, &token, limit).await;
                (token, outcome)
            });
        } else {
            slots[position] = Some(token);
        }
    }

    let mut failures = 0usize;
    while let Some((token, outcome)) = pending.next().await {
        if outcome.is_failed() {
            failures += 1;
        }
        slots[token.position()] = Some(token.with_text(outcome.into_text()));
    }
    if failures > 0 {
        debug!(failures, "synonym lookups fell back to the original word");
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(position, slot)| {
            slot.ok_or_else(|| {
                ChatError::Pipeline(format!("no token resolved for position {}", position))
            })
        })
        .collect()
}
