//! Token record carried through every scrambler phase

use serde::{Deserialize, Serialize};

use super::PartOfSpeech;

/// One lexical unit of a message during transformation.
///
/// `position` is the index in the original tokenization and the only
/// ordering key after tagging. It is fixed at construction; every
/// rewrite produces a new token at the same position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    text: String,
    tag: PartOfSpeech,
    marked: bool,
    position: usize,
}

impl Token {
    /// Create an unmarked token
    pub fn new(text: impl Into<String>, tag: PartOfSpeech, position: usize) -> Self {
        Self {
            text: text.into(),
            tag,
            marked: false,
            position,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tag(&self) -> PartOfSpeech {
        self.tag
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Same token with the marked flag set
    pub fn marked(mut self, marked: bool) -> Self {
        self.marked = marked;
        self
    }

    /// Same token, same position, new text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: self.tag,
            marked: self.marked,
            position: self.position,
        }
    }
}

/// A word and its tag as produced by a [`crate::lexicon::WordTagger`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    pub word: String,
    pub tag: PartOfSpeech,
}

impl TaggedWord {
    pub fn new(word: impl Into<String>, tag: PartOfSpeech) -> Self {
        Self {
            word: word.into(),
            tag,
        }
    }
}
