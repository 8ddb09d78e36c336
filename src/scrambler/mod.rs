//! Message scrambler
//!
//! Turns one chat message into its "telephone game" variant. Each message
//! takes one of two routes, chosen at random:
//!
//! - **Linguistic** (default 70%): five phases over a token sequence
//!   1. tokenize and tag ([`WordTagger`])
//!   2. mark tokens by silliness ([`mark`])
//!   3. resolve synonyms concurrently ([`resolve`])
//!   4. substitute punctuation ([`punctuation`])
//!   5. reassemble in position order ([`assemble`])
//! - **Emoji**: the whole message goes to an [`EmojiGenerator`].
//!
//! Scrambling never fails. Any error or panic inside the phases yields the
//! original text.

pub mod assemble;
pub mod mark;
pub mod punctuation;
pub mod resolve;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{ChatError, ChatResult};
use crate::lexicon::{EmojiGenerator, SynonymResolver, WordTagger};
use crate::types::{Outcome, Token};

/// Tunables for the scrambler
#[derive(Debug, Clone)]
pub struct ScramblerSettings {
    /// Probability of taking the linguistic route instead of emoji
    pub linguistic_probability: f64,
    /// Upper bound on every tagger, resolver and emoji call
    pub leaf_timeout: Duration,
}

/// Share of messages routed through word scrambling
pub const DEFAULT_LINGUISTIC_PROBABILITY: f64 = 0.7;

impl Default for ScramblerSettings {
    fn default() -> Self {
        Self {
            linguistic_probability: DEFAULT_LINGUISTIC_PROBABILITY,
            leaf_timeout: Duration::from_secs(5),
        }
    }
}

/// Which route a message took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Linguistic,
    Emoji,
}

/// Random values drawn once per message
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    pub mode: Mode,
    /// In `[0, 1)`; only used on the linguistic route
    pub silliness: f64,
}

impl Draw {
    pub fn linguistic(silliness: f64) -> Self {
        Self {
            mode: Mode::Linguistic,
            silliness,
        }
    }

    pub fn emoji() -> Self {
        Self {
            mode: Mode::Emoji,
            silliness: 0.0,
        }
    }

    /// Draw route and silliness independently.
    ///
    /// A non-finite probability falls back to the default split.
    pub fn random<R: Rng + ?Sized>(linguistic_probability: f64, rng: &mut R) -> Self {
        let p = if linguistic_probability.is_finite() {
            linguistic_probability.clamp(0.0, 1.0)
        } else {
            DEFAULT_LINGUISTIC_PROBABILITY
        };
        let mode = if rng.random_bool(p) {
            Mode::Linguistic
        } else {
            Mode::Emoji
        };
        Self {
            mode,
            silliness: rng.random::<f64>(),
        }
    }
}

/// Result of scrambling one message
#[derive(Debug, Clone, PartialEq)]
pub struct Scrambled {
    pub text: String,
    pub mode: Mode,
    /// True when the original text was returned because something failed
    pub fell_back: bool,
}

/// The transformation pipeline
pub struct Scrambler {
    tagger: Arc<dyn WordTagger>,
    synonyms: Arc<dyn SynonymResolver>,
    emoji: Arc<dyn EmojiGenerator>,
    settings: ScramblerSettings,
}

impl Scrambler {
    pub fn new(
        tagger: Arc<dyn WordTagger>,
        synonyms: Arc<dyn SynonymResolver>,
        emoji: Arc<dyn EmojiGenerator>,
        settings: ScramblerSettings,
    ) -> Self {
        Self {
            tagger,
            synonyms,
            emoji,
            settings,
        }
    }

    /// Scramble with freshly drawn randomness
    pub async fn scramble(&self, text: &str) -> Scrambled {
        let draw = Draw::random(self.settings.linguistic_probability, &mut rand::rng());
        self.scramble_with(text, draw).await
    }

    /// Scramble along a pre-drawn route
    pub async fn scramble_with(&self, text: &str, draw: Draw) -> Scrambled {
        match draw.mode {
            Mode::Emoji => {
                let outcome = match AssertUnwindSafe(self.render_emoji(text))
                    .catch_unwind()
                    .await
                {
                    Ok(outcome) => outcome,
                    Err(_) => Outcome::failed(text, "emoji generator panicked"),
                };
                debug!(mode = "emoji", replaced = outcome.is_replaced(), "scrambled message");
                Scrambled {
                    fell_back: !outcome.is_replaced(),
                    text: outcome.into_text(),
                    mode: Mode::Emoji,
                }
            }
            Mode::Linguistic => {
                let run = AssertUnwindSafe(self.run_phases(text, draw.silliness))
                    .catch_unwind()
                    .await;
                let result = match run {
                    Ok(result) => result,
                    Err(_) => Err(ChatError::Pipeline("scrambler phase panicked".to_string())),
                };

                match result {
                    Ok(scrambled) => {
                        debug!(mode = "linguistic", silliness = draw.silliness, "scrambled message");
                        Scrambled {
                            text: scrambled,
                            mode: Mode::Linguistic,
                            fell_back: false,
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "scrambler failed, passing message through");
                        Scrambled {
                            text: text.to_string(),
                            mode: Mode::Linguistic,
                            fell_back: true,
                        }
                    }
                }
            }
        }
    }

    /// Phases 1 and 2: tagged, positioned and marked tokens
    pub async fn tag_and_mark(&self, text: &str, silliness: f64) -> ChatResult<Vec<Token>> {
        let limit = self.settings.leaf_timeout;
        let tagged = tokio::time::timeout(limit, self.tagger.tag(text))
            .await
            .map_err(|_| ChatError::Timeout {
                operation: "tagging",
                millis: limit.as_millis() as u64,
            })??;

        Ok(mark::mark(mark::tokens_from_tagged(tagged), silliness))
    }

    async fn run_phases(&self, text: &str, silliness: f64) -> ChatResult<String> {
        let marked = self.tag_and_mark(text, silliness).await?;
        let resolved = resolve::resolve_synonyms(
            marked,
            self.synonyms.as_ref(),
            self.settings.leaf_timeout,
        )
        .await?;
        let punctuated = punctuation::substitute_punctuation(resolved, &mut rand::rng());
        Ok(assemble::assemble(&punctuated))
    }

    async fn render_emoji(&self, text: &str) -> Outcome {
        let limit = self.settings.leaf_timeout;
        match tokio::time::timeout(limit, self.emoji.generate(text)).await {
            Ok(outcome) => outcome,
            Err(_) => Outcome::failed(
                text,
                format!("emoji generation timed out after {}ms", limit.as_millis()),
            ),
        }
    }
}
