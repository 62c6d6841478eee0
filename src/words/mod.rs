use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{BigWordsError, Result};

pub mod dictionary;
pub mod letter_bag;
pub mod letter_set;
pub mod presence;
pub mod random;
pub mod selector;

/// Number of symbols in the alphabet, also the depth of the presence trie
pub const ALPHABET_SIZE: usize = 26;

pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Position of `letter` in the alphabet, if it belongs to it
#[inline]
pub fn letter_index(letter: char) -> Option<usize> {
    if letter.is_ascii_lowercase() {
        Some(letter as usize - 'a' as usize)
    } else {
        None
    }
}

/// Inverse of [`letter_index`]. Panics when `index >= ALPHABET_SIZE`.
#[inline]
pub fn letter_at(index: usize) -> char {
    assert!(index < ALPHABET_SIZE, "letter index {} out of range", index);
    (b'a' + index as u8) as char
}

/// A dictionary word. Always non-empty and made only of `a..=z`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    pub fn new(text: &str) -> Result<Self> {
        Self::validate(text)?;
        Ok(Self(text.to_owned()))
    }

    fn validate(text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(BigWordsError::EmptyWord);
        }
        match text.chars().find(|&c| letter_index(c).is_none()) {
            Some(symbol) => Err(BigWordsError::InvalidSymbol {
                input: text.to_owned(),
                symbol,
            }),
            None => Ok(()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters. Words are ASCII so this is also the byte length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Alphabet indices of each letter, in word order
    pub fn letter_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.bytes().map(|b| (b - b'a') as usize)
    }

    pub fn letter_set(&self) -> letter_set::LetterSet {
        self.0.chars().collect()
    }
}

impl TryFrom<String> for Word {
    type Error = BigWordsError;

    fn try_from(text: String) -> Result<Self> {
        Self::validate(&text)?;
        Ok(Self(text))
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl std::str::FromStr for Word {
    type Err = BigWordsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
