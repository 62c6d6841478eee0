use rand::prelude::SliceRandom;
use rand::Rng;

use super::letter_bag::LetterBag;
use super::letter_set::LetterSet;

/// Where random racks draw their letters from
#[derive(Debug, Clone)]
pub struct LetterSource {
    vowels: Vec<char>,
    consonants: Vec<char>,
}

impl LetterSource {
    /// Letters outside `a..=z` are dropped. An empty pool means that half of
    /// the rack is left out.
    pub fn new(vowels: LetterSet, consonants: LetterSet) -> Self {
        Self {
            vowels: vowels.iter().collect(),
            consonants: consonants.iter().collect(),
        }
    }

    pub fn vowels(&self) -> &[char] {
        &self.vowels
    }

    pub fn consonants(&self) -> &[char] {
        &self.consonants
    }

    /// A shuffled rack of `len` letters, a third of them vowels. Letters are
    /// drawn with replacement.
    pub fn draw<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> String {
        let n_vowels = len / 3;
        let mut letters = Vec::with_capacity(len);
        Self::draw_from(&self.vowels, n_vowels, rng, &mut letters);
        Self::draw_from(&self.consonants, len - n_vowels, rng, &mut letters);
        letters.shuffle(rng);
        letters.into_iter().collect()
    }

    pub fn draw_bag<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> LetterBag {
        let mut letters = [0; super::ALPHABET_SIZE];
        for c in self.draw(len, rng).chars() {
            if let Some(i) = super::letter_index(c) {
                letters[i] += 1;
            }
        }
        LetterBag::new(letters)
    }

    fn draw_from<R: Rng + ?Sized>(pool: &[char], n: usize, rng: &mut R, out: &mut Vec<char>) {
        for _ in 0..n {
            if let Some(&c) = pool.choose(rng) {
                out.push(c);
            }
        }
    }
}

impl Default for LetterSource {
    fn default() -> Self {
        let vowels: LetterSet = "aeiou".chars().collect();
        let consonants: LetterSet = LetterSet::full()
            .iter()
            .filter(|&c| !vowels.contains(c))
            .collect();
        Self::new(vowels, consonants)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_default_pools() {
        let source = LetterSource::default();
        assert_eq!(source.vowels().iter().collect::<String>(), "aeiou");
        assert_eq!(source.consonants().len(), 21);
        assert!(!source.consonants().contains(&'e'));
    }

    #[test]
    fn test_draw_mix() {
        let source = LetterSource::default();
        let mut rng = StdRng::seed_from_u64(7);
        for len in [0, 1, 3, 10, 25] {
            let rack = source.draw(len, &mut rng);
            assert_eq!(rack.len(), len);
            let vowels = rack.chars().filter(|c| source.vowels().contains(c)).count();
            assert_eq!(vowels, len / 3);
            assert!(LetterBag::parse(&rack).is_ok());
        }
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let source = LetterSource::default();
        let a = source.draw(10, &mut StdRng::seed_from_u64(42));
        let b = source.draw(10, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        let bag = source.draw_bag(10, &mut StdRng::seed_from_u64(42));
        assert_eq!(bag, LetterBag::parse(&a).unwrap());
    }

    #[test]
    fn test_empty_pool() {
        let source = LetterSource::new(LetterSet::empty(), "t".chars().collect());
        let rack = source.draw(9, &mut StdRng::seed_from_u64(1));
        assert_eq!(rack, "tttttt");
    }
}
