use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;

use super::letter_bag::LetterBag;
use super::presence::PresenceTrie;
use super::Word;

/// Longest words of `words` that `bag` can spell, in the order given.
/// Lengths above the bag size are skipped since they can never match.
pub(crate) fn longest_formable<'a, I>(words: I, bag: &LetterBag) -> Vec<&'a Word>
where
    I: IntoIterator<Item = &'a Word>,
{
    let mut by_length: BTreeMap<usize, Vec<&Word>> = BTreeMap::new();
    for word in words {
        by_length.entry(word.len()).or_default().push(word);
    }

    // Biggest to smallest
    for (_, words) in by_length.range(..=bag.len()).rev() {
        let matches: Vec<&Word> = words.iter().copied().filter(|w| bag.can_form(w)).collect();
        if !matches.is_empty() {
            return matches;
        }
    }
    Vec::new()
}

/// Every indexed word of maximal length that can be spelled from `bag`.
/// Empty when nothing fits. Ties come back in traversal order.
pub fn largest_words<'a>(index: &'a PresenceTrie, bag: &LetterBag) -> Vec<&'a Word> {
    let candidates = index.candidates(bag.letter_set());
    debug!("{}: {} candidates", bag, candidates.len());
    longest_formable(candidates, bag)
}

/// Answers many bags at once against the same index. Results line up with `bags`.
pub fn largest_words_many<'a>(index: &'a PresenceTrie, bags: &[LetterBag]) -> Vec<Vec<&'a Word>> {
    bags.par_iter().map(|bag| largest_words(index, bag)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(list: &[&str]) -> PresenceTrie {
        PresenceTrie::build(list.iter().map(|w| Word::new(w).unwrap()))
    }

    fn bag(letters: &str) -> LetterBag {
        LetterBag::parse(letters).unwrap()
    }

    fn strs(words: Vec<&Word>) -> Vec<&str> {
        words.into_iter().map(|w| w.as_str()).collect()
    }

    #[test]
    fn test_picks_longest() {
        let trie = index(&["bat", "bath", "tart"]);
        assert_eq!(strs(largest_words(&trie, &bag("abhrtt"))), vec!["bath"]);
    }

    #[test]
    fn test_missing_letter() {
        let trie = index(&["cat", "bat", "frog"]);
        assert!(largest_words(&trie, &bag("abc")).is_empty());
    }

    #[test]
    fn test_repeated_letters() {
        let trie = index(&["a", "at", "att"]);
        assert_eq!(strs(largest_words(&trie, &bag("aatt"))), vec!["att"]);
        // Only one t to spend
        assert_eq!(strs(largest_words(&trie, &bag("cat"))), vec!["at"]);
    }

    #[test]
    fn test_falls_back_to_shorter_lengths() {
        let trie = index(&["att", "tat", "at", "ta"]);
        let mut found = strs(largest_words(&trie, &bag("at")));
        found.sort_unstable();
        assert_eq!(found, vec!["at", "ta"]);
    }

    #[test]
    fn test_returns_every_tie() {
        let trie = index(&["tab", "bat", "tabs", "stab", "bats", "a"]);
        let mut found = strs(largest_words(&trie, &bag("tsab")));
        found.sort_unstable();
        assert_eq!(found, vec!["bats", "stab", "tabs"]);
    }

    #[test]
    fn test_keeps_dictionary_duplicates() {
        let trie = index(&["at", "at"]);
        assert_eq!(strs(largest_words(&trie, &bag("ta"))), vec!["at", "at"]);
    }

    #[test]
    fn test_empty_dictionary() {
        let trie = index(&[]);
        assert!(largest_words(&trie, &bag("abcdef")).is_empty());
    }

    #[test]
    fn test_bag_shorter_than_every_word() {
        let trie = index(&["bath", "tart"]);
        assert!(largest_words(&trie, &bag("bat")).is_empty());
        assert!(largest_words(&trie, &bag("")).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let trie = index(&["rat", "tar", "art", "ra", "t"]);
        let first = largest_words(&trie, &bag("trax"));
        for _ in 0..5 {
            assert_eq!(largest_words(&trie, &bag("trax")), first);
        }
    }

    #[test]
    fn test_many_matches_single() {
        let trie = index(&["bat", "bath", "tart", "cat", "att", "frog"]);
        let bags: Vec<LetterBag> = ["abhrtt", "abc", "cat", "gorf", "q"]
            .iter()
            .map(|b| bag(b))
            .collect();
        let parallel = largest_words_many(&trie, &bags);
        assert_eq!(parallel.len(), bags.len());
        for (b, found) in bags.iter().zip(parallel) {
            assert_eq!(found, largest_words(&trie, b));
        }
    }
}
