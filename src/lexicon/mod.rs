//! Lexical capabilities the scrambler depends on
//!
//! Each capability is a single-method trait so the backing implementation
//! (rule tables, a thesaurus file, a hosted language model) can be swapped
//! without touching the scrambler.
//!
//! - [`WordTagger`]: raw text → ordered tagged words
//! - [`SynonymResolver`]: word + tag → replacement or the word itself
//! - [`EmojiGenerator`]: text → emoji-only rendering or the text itself

mod emoji;
mod resolver;
mod tagger;
mod thesaurus;

use async_trait::async_trait;

use crate::error::ChatResult;
use crate::types::{Outcome, PartOfSpeech, TaggedWord};

pub use emoji::{
    DisabledEmojiGenerator, MistralConfig, MistralEmojiGenerator, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use resolver::LexiconResolver;
pub use tagger::{tokenize, RuleTagger};
pub use thesaurus::{Thesaurus, ADJ_GROUPS, ADV_GROUPS, NOUN_GROUPS, VERB_GROUPS};

/// Splits text into ordered words and assigns each a part of speech
#[async_trait]
pub trait WordTagger: Send + Sync {
    async fn tag(&self, text: &str) -> ChatResult<Vec<TaggedWord>>;
}

/// Looks up a replacement for a word.
///
/// Returns [`Outcome::Unchanged`] when no candidate exists; never errors.
#[async_trait]
pub trait SynonymResolver: Send + Sync {
    async fn resolve(&self, word: &str, tag: PartOfSpeech) -> Outcome;
}

/// Renders a message as emoji only.
///
/// Any failure of the backing service yields [`Outcome::Failed`] carrying
/// the original message.
#[async_trait]
pub trait EmojiGenerator: Send + Sync {
    async fn generate(&self, text: &str) -> Outcome;
}
