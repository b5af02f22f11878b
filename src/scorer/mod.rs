pub mod loader;

use crate::codec;
use crate::error::{CfResult, CipherForgeError};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use tracing::debug;

/// What an unseen trigram contributes to the score sum.
///
/// `Neutral` reproduces the reference behavior: an absent trigram adds 0,
/// which under log10 reads as "probability 1.0". Kept configurable instead
/// of silently corrected; `Floor` substitutes a fixed log-prob instead.
#[derive(Debug, Clone, Copy, PartialEq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum UnseenPolicy {
    Neutral,
    Floor,
}

pub fn parse_unseen_policy(s: &str) -> Result<UnseenPolicy, String> {
    UnseenPolicy::from_str(s)
        .map_err(|_| format!("invalid unseen policy '{}' (expected 'neutral' or 'floor')", s))
}

/// Trigram language model: a log10 relative-frequency table plus the
/// reference statistic of a representative corpus. Pure and thread-safe;
/// shared across rayon workers during selection.
#[derive(Debug)]
pub struct FrequencyModel {
    table: HashMap<[u8; 3], f64>,
    reference: f64,
    policy: UnseenPolicy,
    floor: f64,
}

impl FrequencyModel {
    /// Builds the model from an already-parsed table and a reference corpus.
    /// The corpus is normalized (uppercased, non-letters stripped) before
    /// the reference statistic is computed.
    pub fn new(
        table: HashMap<[u8; 3], f64>,
        corpus: &str,
        policy: UnseenPolicy,
        floor: f64,
    ) -> CfResult<Self> {
        let mut model = FrequencyModel {
            table,
            reference: 0.0,
            policy,
            floor,
        };
        let text = codec::normalize(corpus);
        model.reference = model.score(&text)?;
        debug!(reference = model.reference, corpus_len = text.len(), "reference statistic");
        Ok(model)
    }

    pub fn from_readers<C: Read, T: Read>(
        counts: C,
        mut corpus: T,
        policy: UnseenPolicy,
        floor: f64,
    ) -> CfResult<Self> {
        let table = loader::load_trigram_counts(counts)?;
        let mut corpus_text = String::new();
        corpus.read_to_string(&mut corpus_text)?;
        Self::new(table, &corpus_text, policy, floor)
    }

    pub fn from_files(
        counts_path: &str,
        corpus_path: &str,
        policy: UnseenPolicy,
        floor: f64,
    ) -> CfResult<Self> {
        debug!(counts_path, corpus_path, "loading frequency model");
        let counts = File::open(counts_path)?;
        let corpus = File::open(corpus_path)?;
        Self::from_readers(counts, corpus, policy, floor)
    }

    /// Average trigram log-probability of `text` under the table:
    /// width-3 windows, stride 1, summed and divided by `len - 2`.
    pub fn score(&self, text: &[u8]) -> CfResult<f64> {
        if text.len() < 3 {
            return Err(CipherForgeError::TextTooShort(text.len()));
        }
        let mut sum = 0.0;
        for window in text.windows(3) {
            let gram = [window[0], window[1], window[2]];
            match self.table.get(&gram) {
                Some(v) => sum += v,
                None => match self.policy {
                    UnseenPolicy::Neutral => {}
                    UnseenPolicy::Floor => sum += self.floor,
                },
            }
        }
        Ok(sum / (text.len() - 2) as f64)
    }

    /// Absolute deviation of `text`'s statistic from the reference. Lower is
    /// better; an exact statistical match scores 0.
    pub fn distance(&self, text: &[u8]) -> CfResult<f64> {
        Ok((self.score(text)? - self.reference).abs())
    }

    pub fn reference(&self) -> f64 {
        self.reference
    }
}
