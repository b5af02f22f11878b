use cipherforge::breeder;
use cipherforge::key::{Candidate, Key, Score, ALPHABET_LEN};
use proptest::prelude::*;

fn is_permutation(bytes: &[u8; ALPHABET_LEN]) -> bool {
    let mut seen = [false; ALPHABET_LEN];
    for &b in bytes {
        if !b.is_ascii_uppercase() {
            return false;
        }
        let off = (b - b'A') as usize;
        if seen[off] {
            return false;
        }
        seen[off] = true;
    }
    true
}

fn arb_key() -> impl Strategy<Value = Key> {
    any::<u64>().prop_map(|seed| {
        let mut rng = fastrand::Rng::with_seed(seed);
        Key::random(&mut rng)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn crossover_always_yields_permutation(a in arb_key(), b in arb_key(), seed in any::<u64>()) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let child = breeder::crossover(&mut rng, &a, &b);
        prop_assert!(is_permutation(child.key.as_bytes()));
        prop_assert_eq!(child.score, Score::Unevaluated);
    }

    #[test]
    fn mutate_always_yields_permutation(key in arb_key(), seed in any::<u64>()) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mutated = breeder::mutate(&mut rng, &Candidate::unevaluated(key));
        prop_assert!(is_permutation(mutated.key.as_bytes()));
    }
}

#[test]
fn crossover_of_identical_parents_is_the_parent() {
    let mut rng = fastrand::Rng::with_seed(1);
    let key = Key::random(&mut rng);
    let child = breeder::crossover(&mut rng, &key, &key.clone());
    assert_eq!(child.key, key);
}

#[test]
fn crossover_of_near_identical_parents_is_a_permutation() {
    let mut rng = fastrand::Rng::with_seed(2);
    for _ in 0..50 {
        let a = Key::random(&mut rng);
        let b = breeder::mutate(&mut rng, &Candidate::unevaluated(a.clone())).key;
        let child = breeder::crossover(&mut rng, &a, &b);
        assert!(is_permutation(child.key.as_bytes()));
    }
}

#[test]
fn crossover_of_fully_reversed_parents_is_a_permutation() {
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..50 {
        let a = Key::random(&mut rng);
        let mut reversed = *a.as_bytes();
        reversed.reverse();
        let b = Key::from_bytes(&reversed).unwrap();
        let child = breeder::crossover(&mut rng, &a, &b);
        assert!(is_permutation(child.key.as_bytes()));
    }
}

#[test]
fn mutate_swaps_exactly_two_positions() {
    let mut rng = fastrand::Rng::with_seed(4);
    for _ in 0..100 {
        let key = Key::random(&mut rng);
        let mutated = breeder::mutate(&mut rng, &Candidate::unevaluated(key.clone()));
        let diffs = key
            .as_bytes()
            .iter()
            .zip(mutated.key.as_bytes())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(diffs, 2);
        assert_eq!(mutated.score, Score::Unevaluated);
    }
}

#[test]
fn cross_population_keeps_parents_and_breeds_2n_minus_1_children() {
    let mut rng = fastrand::Rng::with_seed(5);
    let parents: Vec<Candidate> = (0..10)
        .map(|i| Candidate::scored(Key::random(&mut rng), i as f64))
        .collect();

    let pool = breeder::cross_population(&mut rng, &parents);
    assert_eq!(pool.len(), 3 * parents.len() - 1);

    // Elitism: the original parents survive unchanged at the tail
    for (parent, elite) in parents.iter().zip(&pool[2 * parents.len() - 1..]) {
        assert_eq!(parent.key, elite.key);
        assert_eq!(parent.score, elite.score);
    }

    // Children are fresh and unevaluated
    for child in &pool[..2 * parents.len() - 1] {
        assert_eq!(child.score, Score::Unevaluated);
        assert!(is_permutation(child.key.as_bytes()));
    }
}

#[test]
fn cross_population_passes_through_undersized_input() {
    let mut rng = fastrand::Rng::with_seed(6);
    let single = vec![Candidate::unevaluated(Key::random(&mut rng))];
    let pool = breeder::cross_population(&mut rng, &single);
    assert_eq!(pool.len(), 1);
    assert_eq!(pool[0].key, single[0].key);
}

#[test]
fn mutate_population_respects_probability_bounds() {
    let mut rng = fastrand::Rng::with_seed(7);
    let original: Vec<Candidate> = (0..30)
        .map(|_| Candidate::unevaluated(Key::random(&mut rng)))
        .collect();

    let mut untouched = original.clone();
    breeder::mutate_population(&mut rng, &mut untouched, 0.0);
    for (a, b) in original.iter().zip(&untouched) {
        assert_eq!(a.key, b.key);
    }

    let mut all_mutated = original.clone();
    breeder::mutate_population(&mut rng, &mut all_mutated, 1.0);
    for (a, b) in original.iter().zip(&all_mutated) {
        assert_ne!(a.key, b.key);
        assert!(is_permutation(b.key.as_bytes()));
    }
}
