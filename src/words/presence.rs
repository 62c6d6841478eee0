use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::{BigWordsError, Result};

use super::letter_set::LetterSet;
use super::{letter_at, Word, ALPHABET_SIZE};

/*
    Decision tree over the alphabet. The node at depth d asks "does the word
    contain letter d?" and sends the word down `yes` or `no`. After 26 levels
    every word sits in a leaf whose path spells out its exact letter set, so a
    query can throw away whole subtrees of words needing a letter it lacks.

    words = bat bath tart

    a? -yes-> b? -yes-> c? -no-> ... h? -yes-> ... [bath]
                                       -no-->  ... [bat]
               -no--> ... t? -yes-> [tart]
*/

#[derive(Debug, Clone, Serialize, Deserialize)]
enum PresenceNode {
    /// Decision on `letter`, which is also the depth of the node
    Branch { letter: u8, yes: u32, no: u32 },
    /// Words that reached this point. Only non-empty at full depth.
    Leaf { words: Vec<Word> },
}

/// Arena-backed presence trie. Read-only once built, so one index can serve
/// any number of concurrent queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawPresenceTrie")]
pub struct PresenceTrie {
    nodes: Vec<PresenceNode>,
    root: u32,
}

/// Decoded but unchecked form of [`PresenceTrie`]
#[derive(Deserialize)]
struct RawPresenceTrie {
    nodes: Vec<PresenceNode>,
    root: u32,
}

impl TryFrom<RawPresenceTrie> for PresenceTrie {
    type Error = String;

    fn try_from(raw: RawPresenceTrie) -> std::result::Result<Self, String> {
        let trie = Self {
            nodes: raw.nodes,
            root: raw.root,
        };
        trie.validate()?;
        Ok(trie)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    pub nodes: usize,
    pub branches: usize,
    pub leaves: usize,
    pub words: usize,
    /// Size of the biggest leaf bucket
    pub largest_leaf: usize,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} words in {} nodes ({} branches, {} leaves, largest leaf {})",
            self.words, self.nodes, self.branches, self.leaves, self.largest_leaf
        )
    }
}

impl PresenceTrie {
    /// Builds the index over `words`. Duplicates are kept.
    pub fn build<I>(words: I) -> Self
    where
        I: IntoIterator<Item = Word>,
    {
        // Compute each letter set once rather than once per level
        let bucket: Vec<(LetterSet, Word)> =
            words.into_iter().map(|w| (w.letter_set(), w)).collect();

        let mut nodes = Vec::new();
        let root = Self::build_from(&mut nodes, bucket, 0);
        let trie = Self { nodes, root };
        info!("Built presence index: {}", trie.stats());
        trie
    }

    /// Children are pushed before their parent, so the returned index is
    /// always the last node in the arena.
    fn build_from(
        nodes: &mut Vec<PresenceNode>,
        bucket: Vec<(LetterSet, Word)>,
        depth: usize,
    ) -> u32 {
        let node = if depth == ALPHABET_SIZE || bucket.is_empty() {
            PresenceNode::Leaf {
                words: bucket.into_iter().map(|(_, w)| w).collect(),
            }
        } else {
            let (has, not_has): (Vec<_>, Vec<_>) = bucket
                .into_iter()
                .partition(|(set, _)| set.contains_index(depth));
            let yes = Self::build_from(nodes, has, depth + 1);
            let no = Self::build_from(nodes, not_has, depth + 1);
            PresenceNode::Branch {
                letter: depth as u8,
                yes,
                no,
            }
        };
        nodes.push(node);
        (nodes.len() - 1) as u32
    }

    /// Every word that could be formed from a bag whose distinct letters are
    /// `query`, plus words that only fail on letter counts. Words needing a
    /// letter outside `query` are never returned.
    pub fn candidates(&self, query: LetterSet) -> Vec<&Word> {
        let mut out = Vec::new();
        self.collect(self.root, query, &mut out);
        out
    }

    fn collect<'a>(&'a self, idx: u32, query: LetterSet, out: &mut Vec<&'a Word>) {
        match &self.nodes[idx as usize] {
            // No criteria left to decide on. Consider all of these.
            PresenceNode::Leaf { words } => out.extend(words.iter()),
            PresenceNode::Branch { letter, yes, no } => {
                // Having a letter doesn't force a word to use it, so both sides stay in play
                if query.contains_index(*letter as usize) {
                    self.collect(*yes, query, out);
                }
                self.collect(*no, query, out);
            }
        }
    }

    /// All indexed words, in leaf order
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.nodes.iter().flat_map(|n| match n {
            PresenceNode::Leaf { words } => words.as_slice(),
            PresenceNode::Branch { .. } => &[][..],
        })
    }

    /// Number of indexed words
    pub fn len(&self) -> usize {
        self.words().count()
    }

    pub fn is_empty(&self) -> bool {
        self.words().next().is_none()
    }

    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            nodes: self.nodes.len(),
            ..Default::default()
        };
        for node in self.nodes.iter() {
            match node {
                PresenceNode::Branch { .. } => stats.branches += 1,
                PresenceNode::Leaf { words } => {
                    stats.leaves += 1;
                    stats.words += words.len();
                    stats.largest_leaf = stats.largest_leaf.max(words.len());
                }
            }
        }
        stats
    }

    /// Checks the structural invariants. Always holds for a built trie, and
    /// is enforced whenever a trie is deserialized.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(BigWordsError::CorruptIndex)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("index has no nodes".into());
        }
        let mut seen = vec![false; self.nodes.len()];
        self.validate_node(self.root, 0, LetterSet::empty(), LetterSet::empty(), &mut seen)?;
        match seen.iter().position(|&s| !s) {
            Some(orphan) => Err(format!("node {} is unreachable from the root", orphan)),
            None => Ok(()),
        }
    }

    /// `has` and `lacks` are the yes/no decisions taken on the way down
    fn validate_node(
        &self,
        idx: u32,
        depth: usize,
        has: LetterSet,
        lacks: LetterSet,
        seen: &mut [bool],
    ) -> std::result::Result<(), String> {
        let i = idx as usize;
        let node = self
            .nodes
            .get(i)
            .ok_or_else(|| format!("node {} out of range ({} nodes)", idx, self.nodes.len()))?;
        if seen[i] {
            return Err(format!("node {} has more than one parent", idx));
        }
        seen[i] = true;

        match node {
            PresenceNode::Leaf { words } => {
                if depth < ALPHABET_SIZE && !words.is_empty() {
                    return Err(format!("non-empty leaf {} at depth {}", idx, depth));
                }
                for word in words {
                    let set = word.letter_set();
                    if !has.is_subset(&set) || !set.is_disjoint(&lacks) {
                        return Err(format!("word {:?} is in the wrong leaf {}", word, idx));
                    }
                }
                Ok(())
            }
            PresenceNode::Branch { letter, yes, no } => {
                if depth >= ALPHABET_SIZE {
                    return Err(format!("branch {} below full depth", idx));
                }
                if *letter as usize != depth {
                    return Err(format!(
                        "branch {} at depth {} decides on letter {} instead of {:?}",
                        idx,
                        depth,
                        letter,
                        letter_at(depth)
                    ));
                }
                let mut yes_has = has;
                yes_has.insert_index(depth);
                self.validate_node(*yes, depth + 1, yes_has, lacks, seen)?;
                let mut no_lacks = lacks;
                no_lacks.insert_index(depth);
                self.validate_node(*no, depth + 1, has, no_lacks, seen)
            }
        }
    }
}
