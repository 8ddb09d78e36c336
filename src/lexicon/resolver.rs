//! Thesaurus-backed synonym resolver running on a bounded worker pool

use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use tokio::sync::oneshot;

use super::{SynonymResolver, Thesaurus};
use crate::error::{ChatError, ChatResult};
use crate::types::{Outcome, PartOfSpeech};

/// Resolves synonyms from a [`Thesaurus`].
///
/// Lookups run on a fixed-size rayon pool so a burst of messages cannot
/// stall the async runtime.
pub struct LexiconResolver {
    thesaurus: Arc<Thesaurus>,
    pool: Arc<rayon::ThreadPool>,
}

impl LexiconResolver {
    pub fn new(thesaurus: Thesaurus, workers: usize) -> ChatResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("lexicon-{}", i))
            .build()
            .map_err(|e| ChatError::Lexicon(e.to_string()))?;

        Ok(Self {
            thesaurus: Arc::new(thesaurus),
            pool: Arc::new(pool),
        })
    }

    /// Resolver over the compiled-in thesaurus
    pub fn builtin(workers: usize) -> ChatResult<Self> {
        Self::new(Thesaurus::builtin(), workers)
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }
}

/// Carry the capitalisation of `original` over to `replacement`
fn match_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }
    if original.chars().count() > 1 && original.chars().all(|c| !c.is_lowercase()) {
        return replacement.to_uppercase();
    }

    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl SynonymResolver for LexiconResolver {
    async fn resolve(&self, word: &str, tag: PartOfSpeech) -> Outcome {
        if !tag.is_content_word() {
            return Outcome::Unchanged(word.to_string());
        }

        let (tx, rx) = oneshot::channel();
        let thesaurus = Arc::clone(&self.thesaurus);
        let lookup = word.to_string();
        self.pool.spawn(move || {
            let _ = tx.send(thesaurus.candidates(&lookup, tag));
        });

        let candidates = match rx.await {
            Ok(candidates) => candidates,
            Err(_) => return Outcome::failed(word, "lexicon worker dropped the lookup"),
        };

        match candidates.choose(&mut rand::rng()) {
            Some(choice) => Outcome::Replaced(match_case(word, choice)),
            None => Outcome::Unchanged(word.to_string()),
        }
    }
}
