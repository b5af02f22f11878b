//! Permutation-preserving genetic operators. Every function here takes the
//! caller's `fastrand::Rng` so a seeded run is fully reproducible.

use crate::key::{Candidate, Key, ALPHABET_LEN};
use fastrand::Rng;

/// Initial generation: `size` candidates with uniformly random keys.
pub fn random_population(rng: &mut Rng, size: usize) -> Vec<Candidate> {
    (0..size)
        .map(|_| Candidate::unevaluated(Key::random(rng)))
        .collect()
}

fn slot_of(child: &[u8], value: u8) -> Option<usize> {
    child.iter().position(|&c| c == value)
}

/// Cascade repair for a crossover double-conflict: vacate the slot holding
/// `parent[i]`, recursively make room for that slot's own parent value, then
/// commit it. Each step removes one value from the partial child, so the
/// recursion touches each slot at most once and is bounded by the alphabet
/// size (26).
fn resolve_conflict(child: &mut [u8], parent: &[u8; ALPHABET_LEN], i: usize) {
    const HOLE: u8 = 0; // never collides with A-Z
    let Some(slot) = slot_of(child, parent[i]) else {
        return;
    };
    child[slot] = HOLE;
    resolve_conflict(child, parent, slot);
    child[slot] = parent[slot];
}

/// Merges two parent keys position by position. At each position the child
/// takes whichever parent value is not yet used; if neither is used, a coin
/// flip decides; if both are used, the cascade repair frees `first`'s value
/// and the child takes it. The result is always a valid permutation.
pub fn crossover(rng: &mut Rng, first: &Key, second: &Key) -> Candidate {
    let a = first.as_bytes();
    let b = second.as_bytes();
    let mut child: Vec<u8> = Vec::with_capacity(ALPHABET_LEN);

    for i in 0..ALPHABET_LEN {
        if child.contains(&a[i]) && child.contains(&b[i]) {
            resolve_conflict(&mut child, a, i);
        }

        if child.contains(&a[i]) {
            child.push(b[i]);
        } else if child.contains(&b[i]) {
            child.push(a[i]);
        } else if rng.bool() {
            child.push(a[i]);
        } else {
            child.push(b[i]);
        }
    }

    let mut bytes = [0u8; ALPHABET_LEN];
    bytes.copy_from_slice(&child);
    Candidate::unevaluated(Key::from_array_unchecked(bytes))
}

/// Breeds `2n - 1` children from distinct random parent pairs and returns
/// them concatenated with the unchanged parents (elitism). Fewer than two
/// members cannot be paired; the population is returned as-is.
pub fn cross_population(rng: &mut Rng, population: &[Candidate]) -> Vec<Candidate> {
    if population.len() < 2 {
        return population.to_vec();
    }

    let n = population.len();
    let mut pool = Vec::with_capacity(3 * n - 1);
    for _ in 1..(2 * n) {
        let idx1 = rng.usize(0..n);
        let mut idx2 = rng.usize(0..n);
        while idx2 == idx1 {
            idx2 = rng.usize(0..n);
        }
        pool.push(crossover(rng, &population[idx1].key, &population[idx2].key));
    }
    pool.extend_from_slice(population);
    pool
}

/// Swaps two distinct key positions. A transposition trivially preserves the
/// permutation invariant.
pub fn mutate(rng: &mut Rng, candidate: &Candidate) -> Candidate {
    let mut bytes = *candidate.key.as_bytes();
    let first = rng.usize(0..ALPHABET_LEN);
    let mut second = rng.usize(0..ALPHABET_LEN);
    while second == first {
        second = rng.usize(0..ALPHABET_LEN);
    }
    bytes.swap(first, second);
    Candidate::unevaluated(Key::from_array_unchecked(bytes))
}

/// Mutates each member independently with probability `probability`.
pub fn mutate_population(rng: &mut Rng, population: &mut [Candidate], probability: f64) {
    for candidate in population.iter_mut() {
        if rng.f64() < probability {
            *candidate = mutate(rng, candidate);
        }
    }
}
