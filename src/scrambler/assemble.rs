//! Phase 5: reassembly into a single line

use crate::types::{PartOfSpeech, Token};

/// Tokens in position order with their final display text.
///
/// Underscores in resolved synonyms become spaces; the token count is
/// unchanged.
pub fn render(tokens: &[Token]) -> Vec<Token> {
    let mut ordered: Vec<&Token> = tokens.iter().collect();
    ordered.sort_by_key(|token| token.position());

    ordered
        .into_iter()
        .map(|token| {
            if token.is_marked() && token.tag().is_content_word() && token.text().contains('_') {
                token.with_text(token.text().replace('_', " "))
            } else {
                token.clone()
            }
        })
        .collect()
}

/// Join tokens into the outgoing message text
pub fn assemble(tokens: &[Token]) -> String {
    let mut line = String::new();
    for token in render(tokens) {
        if token.tag() != PartOfSpeech::PunctTerminal {
            line.push(' ');
        }
        line.push_str(token.text());
    }
    line.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_punctuation_has_no_leading_space() {
        let tokens = vec![
            Token::new("hello", PartOfSpeech::Noun, 0),
            Token::new("world", PartOfSpeech::Noun, 1),
            Token::new("!", PartOfSpeech::PunctTerminal, 2),
        ];
        assert_eq!(assemble(&tokens), "hello world!");
    }

    #[test]
    fn test_other_punctuation_gets_a_space() {
        let tokens = vec![
            Token::new("well", PartOfSpeech::Adv, 0),
            Token::new(",", PartOfSpeech::PunctOther, 1),
            Token::new("ok", PartOfSpeech::Other, 2),
        ];
        assert_eq!(assemble(&tokens), "well , ok");
    }

    #[test]
    fn test_orders_by_position_not_slice_order() {
        let tokens = vec![
            Token::new("c", PartOfSpeech::Noun, 2),
            Token::new("a", PartOfSpeech::Noun, 0),
            Token::new("b", PartOfSpeech::Noun, 1),
        ];
        assert_eq!(assemble(&tokens), "a b c");

        let rendered = render(&tokens);
        assert_eq!(rendered.len(), tokens.len());
        assert!(rendered
            .windows(2)
            .all(|pair| pair[0].position() <= pair[1].position()));
    }

    #[test]
    fn test_resolved_multiword_synonym_renders_with_spaces() {
        let tokens = vec![
            Token::new("show_up", PartOfSpeech::Verb, 0).marked(true),
            Token::new("snake_case", PartOfSpeech::Noun, 1),
        ];
        assert_eq!(assemble(&tokens), "show up snake_case");
        assert_eq!(render(&tokens).len(), 2);
    }

    #[test]
    fn test_leading_terminal_punctuation_is_trimmed() {
        let tokens = vec![
            Token::new("?", PartOfSpeech::PunctTerminal, 0),
            Token::new("what", PartOfSpeech::Other, 1),
        ];
        assert_eq!(assemble(&tokens), "? what");
    }

    #[test]
    fn test_empty() {
        assert_eq!(assemble(&[]), "");
    }
}
