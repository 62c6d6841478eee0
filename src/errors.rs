//! Error type shared by the whole crate.

/// Result type defaulting to [`BigWordsError`].
pub type Result<T, E = BigWordsError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum BigWordsError {
    /// A word or rack contains something other than `a..=z`
    #[error("invalid symbol {symbol:?} in {input:?}")]
    InvalidSymbol { input: String, symbol: char },

    /// Words must have at least one letter
    #[error("empty word")]
    EmptyWord,

    /// A persisted index failed to decode or broke a structural invariant.
    /// Callers are expected to rebuild from the dictionary.
    #[error("corrupt index: {0}")]
    CorruptIndex(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BigWordsError {
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptIndex(reason.into())
    }

    pub fn is_corrupt_index(&self) -> bool {
        matches!(self, Self::CorruptIndex(_))
    }
}
