//! Phase 4: punctuation substitution

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::types::{PartOfSpeech, Token};

/// Replacements for marked sentence-ending punctuation
pub const TERMINAL_CHOICES: &[&str] = &["?", ".", "!"];

/// Replacements for comma-like punctuation
pub const COMMA_CHOICES: &[&str] = &["?", ".", "!", "-", "..."];

const COMMA_LIKE: &[&str] = &[",", ";"];

pub fn is_comma_like(token: &Token) -> bool {
    token.tag() == PartOfSpeech::PunctOther && COMMA_LIKE.contains(&token.text())
}

/// Swap punctuation for random alternatives.
///
/// Terminal punctuation changes only when marked; comma-like marks
/// always change. Everything else passes through.
pub fn substitute_punctuation<R: Rng + ?Sized>(tokens: Vec<Token>, rng: &mut R) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|token| {
            let choices = if token.tag() == PartOfSpeech::PunctTerminal && token.is_marked() {
                TERMINAL_CHOICES
            } else if is_comma_like(&token) {
                COMMA_CHOICES
            } else {
                return token;
            };

            match choices.choose(rng) {
                Some(choice) => token.with_text(*choice),
                None => token,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tokens: Vec<Token>) -> Vec<Token> {
        substitute_punctuation(tokens, &mut rand::rng())
    }

    #[test]
    fn test_marked_terminal_punctuation_uses_terminal_set() {
        for _ in 0..50 {
            let out = run(vec![Token::new(".", PartOfSpeech::PunctTerminal, 0).marked(true)]);
            assert!(TERMINAL_CHOICES.contains(&out[0].text()));
            assert_eq!(out[0].position(), 0);
        }
    }

    #[test]
    fn test_unmarked_terminal_punctuation_is_kept() {
        let token = Token::new("!", PartOfSpeech::PunctTerminal, 0);
        assert_eq!(run(vec![token.clone()]), vec![token]);
    }

    #[test]
    fn test_comma_uses_comma_set() {
        for _ in 0..50 {
            let out = run(vec![Token::new(",", PartOfSpeech::PunctOther, 2)]);
            assert!(COMMA_CHOICES.contains(&out[0].text()));
            assert_eq!(out[0].position(), 2);
        }
    }

    #[test]
    fn test_other_tokens_pass_through() {
        let tokens = vec![
            Token::new("dog", PartOfSpeech::Noun, 0).marked(true),
            Token::new("(", PartOfSpeech::PunctOther, 1),
            Token::new("42", PartOfSpeech::Other, 2),
        ];
        assert_eq!(run(tokens.clone()), tokens);
    }
}
