//! Part-of-speech tags

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tag assigned to every token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartOfSpeech {
    Adj,
    Adv,
    Noun,
    Verb,
    /// Sentence-ending punctuation: `.`, `!`, `?`, `...`
    PunctTerminal,
    /// Any other punctuation or symbol
    PunctOther,
    Other,
}

impl PartOfSpeech {
    /// Content words are the only tags the synonym resolver understands
    pub fn is_content_word(self) -> bool {
        matches!(self, Self::Adj | Self::Adv | Self::Noun | Self::Verb)
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Adj => "ADJ",
            Self::Adv => "ADV",
            Self::Noun => "NOUN",
            Self::Verb => "VERB",
            Self::PunctTerminal => "PUNCT-terminal",
            Self::PunctOther => "PUNCT-other",
            Self::Other => "OTHER",
        };
        f.write_str(label)
    }
}
