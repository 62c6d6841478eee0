use std::fmt;

use crate::errors::{BigWordsError, Result};

use super::letter_set::LetterSet;
use super::{letter_at, letter_index, Word, ALPHABET_SIZE};

/// Multiset of letters available for a query
#[derive(Clone, PartialEq, Eq)]
pub struct LetterBag {
    /// Histogram count of each letter in the bag
    letters: [u32; ALPHABET_SIZE],
    /// Total number of letters, repeats included. Wider than the counts so
    /// summing them can't overflow.
    n_total: u64,
}

impl LetterBag {
    pub fn new(letters: [u32; ALPHABET_SIZE]) -> Self {
        let n_total = letters.iter().map(|&n| n as u64).sum();
        Self { letters, n_total }
    }

    pub fn empty() -> Self {
        Self::new([0; ALPHABET_SIZE])
    }

    /// Parses a rack such as `"abhrtt"`. Letter order is irrelevant.
    pub fn parse(text: &str) -> Result<Self> {
        let mut letters = [0u32; ALPHABET_SIZE];
        for symbol in text.chars() {
            match letter_index(symbol) {
                Some(i) => letters[i] = letters[i].saturating_add(1),
                None => {
                    return Err(BigWordsError::InvalidSymbol {
                        input: text.to_owned(),
                        symbol,
                    })
                }
            }
        }
        Ok(Self::new(letters))
    }

    /// Total letters in the bag
    pub fn len(&self) -> usize {
        usize::try_from(self.n_total).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.n_total == 0
    }

    pub fn count(&self, letter: char) -> u32 {
        letter_index(letter).map_or(0, |i| self.letters[i])
    }

    /// Distinct letters, which is all the presence trie looks at
    pub fn letter_set(&self) -> LetterSet {
        let mut set = LetterSet::empty();
        for (i, &n) in self.letters.iter().enumerate() {
            if n > 0 {
                set.insert_index(i);
            }
        }
        set
    }

    /// Exact multiset check: true iff every letter of `word` can be taken
    /// from the bag without using any bag letter twice.
    pub fn can_form(&self, word: &Word) -> bool {
        if word.len() as u64 > self.n_total {
            return false;
        }
        let mut working = self.letters;
        for i in word.letter_indices() {
            if working[i] == 0 {
                return false;
            }
            working[i] -= 1;
        }
        true
    }
}

impl std::str::FromStr for LetterBag {
    type Err = BigWordsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&Word> for LetterBag {
    fn from(word: &Word) -> Self {
        let mut letters = [0; ALPHABET_SIZE];
        word.letter_indices().for_each(|i| letters[i] += 1);
        Self::new(letters)
    }
}

impl fmt::Display for LetterBag {
    /// Letters in alphabet order, repeats included
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, &n) in self.letters.iter().enumerate() {
            for _ in 0..n {
                write!(f, "{}", letter_at(i))?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for LetterBag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LetterBag({:?})", self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn test_parse() {
        let bag = LetterBag::parse("abhrtt").unwrap();
        assert_eq!(bag.len(), 6);
        assert_eq!(bag.count('t'), 2);
        assert_eq!(bag.count('z'), 0);
        assert_eq!(bag.to_string(), "abhrtt");
        assert_eq!(format!("{:?}", bag.letter_set()), "[abhrt]");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        match LetterBag::parse("ab c") {
            Err(BigWordsError::InvalidSymbol { symbol, .. }) => assert_eq!(symbol, ' '),
            other => panic!("unexpected {:?}", other),
        }
        assert!("ABC".parse::<LetterBag>().is_err());
        assert!(LetterBag::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_can_form() {
        let bag = LetterBag::parse("abhrtt").unwrap();
        assert!(bag.can_form(&word("bath")));
        assert!(bag.can_form(&word("tart")));
        assert!(bag.can_form(&word("bat")));
        assert!(!bag.can_form(&word("batch")));
    }

    #[test]
    fn test_can_form_respects_counts() {
        let bag = LetterBag::parse("cat").unwrap();
        assert!(!bag.can_form(&word("att")));
        assert!(bag.can_form(&word("act")));

        let bag = LetterBag::parse("aatt").unwrap();
        assert!(bag.can_form(&word("att")));
        assert!(!bag.can_form(&word("tatt")));
    }

    #[test]
    fn test_can_form_longer_than_bag() {
        let bag = LetterBag::parse("ab").unwrap();
        assert!(!bag.can_form(&word("aba")));
        assert!(!LetterBag::empty().can_form(&word("a")));
    }

    #[test]
    fn test_can_form_leaves_bag_untouched() {
        let bag = LetterBag::parse("aatt").unwrap();
        let before = bag.clone();
        assert!(bag.can_form(&word("att")));
        assert!(bag.can_form(&word("att")));
        assert_eq!(bag, before);
    }

    #[test]
    fn test_huge_counts() {
        let mut letters = [0; ALPHABET_SIZE];
        letters[0] = u32::MAX;
        letters[1] = 1;
        let bag = LetterBag::new(letters);
        assert_eq!(bag.len() as u64, u32::MAX as u64 + 1);
        assert!(bag.can_form(&word("ab")));
        assert!(bag.can_form(&word("aaaab")));
        assert!(!bag.can_form(&word("abb")));
    }

    #[test]
    fn test_from_word() {
        let bag = LetterBag::from(&word("banana"));
        assert_eq!(bag.count('a'), 3);
        assert_eq!(bag.count('n'), 2);
        assert!(bag.can_form(&word("banana")));
    }
}
