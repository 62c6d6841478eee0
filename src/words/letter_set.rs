use std::fmt;

use super::{letter_at, letter_index, ALPHABET_SIZE};

const FULL: u32 = (1 << ALPHABET_SIZE) - 1;

/// Set of distinct letters, counts ignored
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct LetterSet {
    // bit i is one if letter i is in it
    accepted: u32,
}

impl LetterSet {
    pub fn empty() -> Self {
        Self { accepted: 0 }
    }
    pub fn full() -> Self {
        Self { accepted: FULL }
    }
    /// Letters outside the alphabet are never contained
    pub fn contains(&self, letter: char) -> bool {
        letter_index(letter).map_or(false, |i| self.contains_index(i))
    }
    pub fn contains_index(&self, index: usize) -> bool {
        index < ALPHABET_SIZE && (self.accepted & (1 << index)) != 0
    }
    /// Inserting a letter outside the alphabet is a no-op
    pub fn insert(&mut self, letter: char) {
        if let Some(i) = letter_index(letter) {
            self.insert_index(i);
        }
    }
    pub fn insert_index(&mut self, index: usize) {
        debug_assert!(index < ALPHABET_SIZE);
        self.accepted |= 1 << index;
    }
    pub fn is_empty(&self) -> bool {
        self.accepted == 0
    }
    pub fn is_full(&self) -> bool {
        self.accepted == FULL
    }
    pub fn len(&self) -> usize {
        self.accepted.count_ones() as usize
    }
    pub fn is_subset(&self, other: &LetterSet) -> bool {
        self.accepted & !other.accepted == 0
    }
    pub fn is_disjoint(&self, other: &LetterSet) -> bool {
        self.accepted & other.accepted == 0
    }
    /// Letters in alphabet order
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        (0..ALPHABET_SIZE)
            .filter(move |&i| self.contains_index(i))
            .map(letter_at)
    }
}

impl Default for LetterSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::iter::FromIterator<char> for LetterSet {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = char>,
    {
        let mut tmp = Self::default();
        iter.into_iter().for_each(|l| tmp.insert(l));
        tmp
    }
}

impl fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_full() {
            write!(f, ".")
        } else {
            write!(f, "[")?;
            for l in self.iter() {
                write!(f, "{}", l)?;
            }
            write!(f, "]")
        }
    }
}
