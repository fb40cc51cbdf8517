use rand::Rng;

/// Returns a uniformly random permutation of `items`.
///
/// Fisher-Yates: walk from the last slot down to 1 and swap each slot with a
/// uniformly drawn slot at or before it. The source slice is never touched,
/// the permutation is built on an owned copy.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffle_in_place(&mut shuffled, rng);
    shuffled
}

/// In-place variant used when the caller already owns a fresh copy.
/// Same top-down walk as `rand::seq::SliceRandom::shuffle`.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// A random ordering of `0..len`, used for display orders that must keep a
/// mapping back to the canonical index.
pub fn permutation<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    shuffle_in_place(&mut order, rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn empty_and_singleton_are_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffle::<u8, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffle(&["only"], &mut rng), vec!["only"]);
    }

    #[test]
    fn source_is_not_mutated() {
        let mut rng = StdRng::seed_from_u64(7);
        let source = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let shuffled = shuffle(&source, &mut rng);
        assert_eq!(source, vec![1, 2, 3, 4, 5, 6, 7, 8]);

        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, source);
    }

    #[test]
    fn three_items_hit_every_ordering_evenly() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let trials = 60_000;
        let mut counts: HashMap<Vec<char>, usize> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(shuffle(&['a', 'b', 'c'], &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        let expected = trials as f64 / 6.0;
        for (ordering, count) in counts {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(
                deviation < 0.05,
                "ordering {ordering:?} appeared {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn permutation_covers_every_index() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut order = permutation(10, &mut rng);
        order.sort();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }
}
