//! Rule-based tokenizer and part-of-speech tagger

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use super::WordTagger;
use crate::error::{ChatError, ChatResult};
use crate::types::{PartOfSpeech, TaggedWord};

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "any", "no", "every", "each", "all", "both", "either", "neither", "many",
    "few", "several",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
    "whose", "which", "what", "mine", "yours", "hers", "ours", "theirs", "someone", "something",
    "anyone", "anything", "everyone", "everything", "nobody", "nothing",
];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "we", "they"];

const PREPOSITIONS_AND_CONJUNCTIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "of", "off",
    "over", "under", "near", "and", "or", "but", "nor", "so", "yet", "because", "although",
    "if", "unless", "while", "than", "as", "like",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
];

/// Words after which a content word is read as a verb
const VERB_TRIGGERS: &[&str] = &[
    "to", "will", "would", "shall", "should", "can", "could", "may", "might", "must", "do",
    "does", "did", "don't", "can't", "won't", "didn't", "let's",
];

const ADVERBS: &[&str] = &[
    "not", "never", "always", "often", "sometimes", "very", "really", "quite", "too", "also",
    "just", "now", "then", "here", "there", "soon", "already", "still", "almost", "again",
    "ever", "well", "maybe", "perhaps", "today", "tomorrow", "yesterday", "later",
];

const ADJECTIVES: &[&str] = &[
    "good", "bad", "big", "small", "great", "new", "old", "happy", "sad", "little", "long",
    "short", "high", "low", "young", "nice", "hot", "cold", "fast", "slow", "funny", "cool",
    "awesome", "weird", "pretty", "ugly", "smart", "angry", "tired", "hungry", "quiet", "loud",
];

const VERBS: &[&str] = &[
    "go", "get", "make", "know", "think", "take", "see", "come", "want", "look", "use", "find",
    "give", "tell", "work", "call", "try", "ask", "need", "feel", "become", "leave", "put",
    "mean", "keep", "let", "begin", "seem", "help", "talk", "turn", "start", "show", "hear",
    "play", "run", "move", "live", "believe", "hold", "bring", "write", "sit", "stand", "lose",
    "pay", "meet", "eat", "love", "hate", "say", "went", "said", "got", "made", "knew",
    "thought", "took", "saw", "came", "ate", "ran", "sleep", "walk", "jump", "sing", "dance",
];

const TERMINAL_PUNCTUATION: &[&str] = &[".", "!", "?", "..."];

/// Alternatives in priority order. A symbol keeps its trailing marks,
/// skin-tone modifiers and ZWJ-joined symbols so emoji survive intact.
const TOKEN_PATTERN: &str = concat!(
    r"\.\.\.",
    r"|[\p{L}\p{N}\p{M}]+(?:['’][\p{L}\p{N}\p{M}]+)*",
    r"|[\x{1F1E6}-\x{1F1FF}]{2}",
    r"|[^\s\p{L}\p{N}\p{M}](?:[\p{M}\x{1F3FB}-\x{1F3FF}]|\x{200D}[^\s\p{L}\p{N}\p{M}])*",
);

fn token_pattern() -> ChatResult<&'static Regex> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(TOKEN_PATTERN))
        .as_ref()
        .map_err(|e| ChatError::Tagging(format!("invalid token pattern: {}", e)))
}

/// Split text into words, numbers, ellipses and single symbol clusters
pub fn tokenize(text: &str) -> ChatResult<Vec<&str>> {
    Ok(token_pattern()?.find_iter(text).map(|m| m.as_str()).collect())
}

/// Tagger built from closed-class word lists and suffix heuristics
#[derive(Debug, Default, Clone)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        Self
    }

    /// Tag a tokenized sentence; `previous` is the lowercased prior word
    fn tag_word(word: &str, previous: Option<&str>) -> PartOfSpeech {
        if TERMINAL_PUNCTUATION.contains(&word) {
            return PartOfSpeech::PunctTerminal;
        }
        if !word.chars().any(char::is_alphanumeric) {
            return PartOfSpeech::PunctOther;
        }
        if word.chars().all(|c| c.is_numeric()) {
            return PartOfSpeech::Other;
        }

        let lower = word.to_lowercase();
        let lower = lower.as_str();

        if AUXILIARIES.contains(&lower) {
            return PartOfSpeech::Verb;
        }
        if DETERMINERS.contains(&lower)
            || PRONOUNS.contains(&lower)
            || PREPOSITIONS_AND_CONJUNCTIONS.contains(&lower)
            || lower.contains('\'')
            || lower.contains('’')
        {
            return PartOfSpeech::Other;
        }
        if ADVERBS.contains(&lower) {
            return PartOfSpeech::Adv;
        }
        if VERBS.contains(&lower) {
            return PartOfSpeech::Verb;
        }
        if ADJECTIVES.contains(&lower) {
            return PartOfSpeech::Adj;
        }

        if let Some(prev) = previous {
            if VERB_TRIGGERS.contains(&prev) || SUBJECT_PRONOUNS.contains(&prev) {
                return PartOfSpeech::Verb;
            }
        }

        Self::tag_by_suffix(lower)
    }

    fn tag_by_suffix(lower: &str) -> PartOfSpeech {
        let long = lower.chars().count() > 4;
        if long && lower.ends_with("ly") {
            return PartOfSpeech::Adv;
        }
        if long && (lower.ends_with("ing") || lower.ends_with("ed")) {
            return PartOfSpeech::Verb;
        }
        const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ic", "ish"];
        if long && ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return PartOfSpeech::Adj;
        }
        PartOfSpeech::Noun
    }
}

#[async_trait]
impl WordTagger for RuleTagger {
    async fn tag(&self, text: &str) -> ChatResult<Vec<TaggedWord>> {
        let words = tokenize(text)?;
        if words.is_empty() && !text.trim().is_empty() {
            return Err(ChatError::Tagging(format!(
                "no tokens recognised in {} bytes of text",
                text.len()
            )));
        }

        let mut tagged = Vec::with_capacity(words.len());
        let mut previous: Option<String> = None;
        for word in words {
            let tag = Self::tag_word(word, previous.as_deref());
            tagged.push(TaggedWord::new(word, tag));
            previous = Some(word.to_lowercase());
        }
        Ok(tagged)
    }
}
