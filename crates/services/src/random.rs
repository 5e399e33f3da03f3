//! Uniform random helpers shared by the quiz engines.

use rand::Rng;
use rand::rng;
use rand::seq::{IndexedRandom, SliceRandom};

/// A uniformly shuffled copy of `items`; the input is left untouched.
#[must_use]
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rng())
}

/// [`shuffle`] driven by a caller-supplied generator.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// One element chosen uniformly, or `None` for an empty slice.
#[must_use]
pub fn pick_one<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rng())
}

/// `n` distinct elements in random order.
///
/// When `n` is at least the length of `items` the whole slice comes back
/// shuffled.
#[must_use]
pub fn pick_n<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    let mut picked = shuffle(items);
    picked.truncate(n);
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn shuffle_is_a_permutation_and_leaves_input_alone() {
        let input: Vec<u32> = (0..20).collect();
        let original = input.clone();

        let mut shuffled = shuffle(&input);

        assert_eq!(input, original);
        assert_eq!(shuffled.len(), input.len());
        shuffled.sort_unstable();
        assert_eq!(shuffled, original);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let input = ["C", "G", "D", "A", "E"];
        let first = shuffle_with(&input, &mut StdRng::seed_from_u64(7));
        let second = shuffle_with(&input, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_reaches_every_position() {
        let input = [1, 2, 3];
        let mut rng = StdRng::seed_from_u64(42);
        let mut firsts = HashSet::new();
        for _ in 0..200 {
            firsts.insert(shuffle_with(&input, &mut rng)[0]);
        }
        assert_eq!(firsts.len(), 3);
    }

    #[test]
    fn pick_one_handles_empty_input() {
        let empty: [u8; 0] = [];
        assert_eq!(pick_one(&empty), None);
        assert_eq!(pick_one(&[9]), Some(&9));
    }

    #[test]
    fn pick_n_returns_distinct_members() {
        let input: Vec<u32> = (0..11).collect();
        for _ in 0..50 {
            let picked = pick_n(&input, 3);
            assert_eq!(picked.len(), 3);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 3);
            assert!(picked.iter().all(|item| input.contains(item)));
        }
    }

    #[test]
    fn pick_n_beyond_length_returns_everything() {
        let input = vec!["a", "b"];
        let mut picked = pick_n(&input, 5);
        picked.sort_unstable();
        assert_eq!(picked, input);
    }
}
