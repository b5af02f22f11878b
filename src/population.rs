//! Ranking and truncation of candidate generations.

use crate::codec;
use crate::error::CfResult;
use crate::key::{Candidate, Key, ALPHABET_LEN};
use crate::scorer::FrequencyModel;
use rayon::prelude::*;
use std::collections::HashSet;

/// Re-scores, ranks, deduplicates and truncates a population.
///
/// Every candidate is re-evaluated unconditionally: keys may have been bred
/// or mutated since the last pass, so prior scores are never trusted.
/// Evaluation runs on the rayon pool; each candidate is tagged with its
/// pre-evaluation index and the sort key is `(score, index)`, so parallel
/// scheduling never changes the ranking. Duplicate keys keep their first
/// (best-ranked) occurrence. Returns fewer than `keep` when fewer unique
/// keys exist; never pads.
pub fn select_best(
    model: &FrequencyModel,
    ciphertext: &[u8],
    population: &[Candidate],
    keep: usize,
) -> CfResult<Vec<Candidate>> {
    let mut ranked: Vec<(f64, usize, &Key)> = population
        .par_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let decoded = codec::decode(ciphertext, &candidate.key)?;
            let distance = model.distance(&decoded)?;
            Ok((distance, index, &candidate.key))
        })
        .collect::<CfResult<Vec<_>>>()?;

    ranked.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut seen: HashSet<[u8; ALPHABET_LEN]> = HashSet::with_capacity(ranked.len());
    let mut out = Vec::with_capacity(keep.min(ranked.len()));
    for (distance, _, key) in ranked {
        if out.len() == keep {
            break;
        }
        if seen.insert(*key.as_bytes()) {
            out.push(Candidate::scored(key.clone(), distance));
        }
    }
    Ok(out)
}

/// Number of distinct keys in a population. Diversity diagnostic.
pub fn unique_keys(population: &[Candidate]) -> usize {
    population
        .iter()
        .map(|c| c.key.as_bytes())
        .collect::<HashSet<_>>()
        .len()
}
