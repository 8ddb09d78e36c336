//! Explicit success/fallback results for leaf capabilities

/// What a leaf capability produced for one input.
///
/// Every variant carries usable text, so callers never need a separate
/// error path to fall back to the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A replacement was produced
    Replaced(String),
    /// Nothing to replace with; carries the input unchanged
    Unchanged(String),
    /// The capability failed; carries the input unchanged
    Failed { original: String, reason: String },
}

impl Outcome {
    pub fn failed(original: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            original: original.into(),
            reason: reason.into(),
        }
    }

    /// Text to use downstream, whichever variant this is
    pub fn text(&self) -> &str {
        match self {
            Self::Replaced(text) | Self::Unchanged(text) => text,
            Self::Failed { original, .. } => original,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Replaced(text) | Self::Unchanged(text) => text,
            Self::Failed { original, .. } => original,
        }
    }

    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
