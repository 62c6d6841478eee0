//! Finds the longest dictionary words that can be spelled from a rack of
//! letters.
//!
//! The dictionary is indexed once into a [`PresenceTrie`], a 26 level decision
//! tree splitting words on whether they contain each letter. Queries walk the
//! tree to discard words needing letters the rack lacks, then run the exact
//! count check only on what is left, longest words first.

pub mod errors;
pub mod utils;
pub mod words;

pub use errors::{BigWordsError, Result};
pub use words::dictionary::Dictionary;
pub use words::letter_bag::LetterBag;
pub use words::letter_set::LetterSet;
pub use words::presence::{IndexStats, PresenceTrie};
pub use words::random::LetterSource;
pub use words::selector::{largest_words, largest_words_many};
pub use words::Word;
