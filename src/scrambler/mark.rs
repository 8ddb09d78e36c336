//! Phases 1 and 2: token construction and silliness-based marking

use crate::types::{PartOfSpeech, TaggedWord, Token};

/// Above this, verbs and nouns are marked
pub const CONTENT_THRESHOLD: f64 = 0.1;
/// Above this, adjectives and adverbs are marked as well
pub const MODIFIER_THRESHOLD: f64 = 0.4;
/// Above this, terminal punctuation is marked as well
pub const PUNCTUATION_THRESHOLD: f64 = 0.5;

/// Number tagged words by their order in the message
pub fn tokens_from_tagged(tagged: Vec<TaggedWord>) -> Vec<Token> {
    tagged
        .into_iter()
        .enumerate()
        .map(|(position, word)| Token::new(word.word, word.tag, position))
        .collect()
}

/// Whether a token with `tag` is eligible for replacement at `silliness`.
///
/// Bands are cumulative: a higher silliness keeps every lower band.
pub fn is_eligible(tag: PartOfSpeech, silliness: f64) -> bool {
    let content = silliness > CONTENT_THRESHOLD
        && matches!(tag, PartOfSpeech::Verb | PartOfSpeech::Noun);
    let modifier = silliness > MODIFIER_THRESHOLD
        && matches!(tag, PartOfSpeech::Adj | PartOfSpeech::Adv);
    let punctuation = silliness > PUNCTUATION_THRESHOLD && tag == PartOfSpeech::PunctTerminal;

    content || modifier || punctuation
}

/// Set the marked flag on every token from its tag alone
pub fn mark(tokens: Vec<Token>, silliness: f64) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|token| {
            let eligible = is_eligible(token.tag(), silliness);
            token.marked(eligible)
        })
        .collect()
}
