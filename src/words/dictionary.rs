use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};

use crate::errors::Result;

use super::letter_bag::LetterBag;
use super::presence::PresenceTrie;
use super::selector;
use super::Word;

/// Validated word list, in input order with duplicates kept
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<Word>,
    /// Number of records dropped for containing a non-alphabet symbol
    rejected: usize,
}

impl Dictionary {
    /// Builds a dictionary from already lowercase words. Empty or invalid
    /// records are skipped and counted.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::default();
        for record in words {
            dict.push_record(record.as_ref());
        }
        dict
    }

    /// Line oriented word list: one word per line, surrounding whitespace
    /// ignored, blank lines skipped, ASCII capitals folded to lowercase.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut dict = Self::default();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            dict.push_record(&word.to_ascii_lowercase());
        }
        if dict.rejected > 0 {
            warn!("Skipped {} words with symbols outside a-z", dict.rejected);
        }
        Ok(dict)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let dict = Self::from_reader(BufReader::new(file))?;
        info!("Read {} words from {}", dict.len(), path.as_ref().display());
        Ok(dict)
    }

    fn push_record(&mut self, record: &str) {
        if record.is_empty() {
            return;
        }
        match Word::new(record) {
            Ok(word) => self.words.push(word),
            Err(e) => {
                debug!("Rejected dictionary record: {}", e);
                self.rejected += 1;
            }
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Builds the presence index over a copy of the words
    pub fn build_index(&self) -> PresenceTrie {
        PresenceTrie::build(self.words.iter().cloned())
    }

    pub fn into_index(self) -> PresenceTrie {
        PresenceTrie::build(self.words)
    }

    /// Answers a query by checking every word, without an index. Slow but
    /// obviously correct, and results come back in dictionary order.
    pub fn largest_words_linear(&self, bag: &LetterBag) -> Vec<&Word> {
        selector::longest_formable(self.words.iter(), bag)
    }
}
