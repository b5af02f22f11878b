use crate::error::{CfResult, CipherForgeError};
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Parses `trigram<TAB>count` records into a log10 relative-frequency table.
///
/// Loading is strict: a record with the wrong field count, a trigram that is
/// not exactly 3 letters, or a non-numeric count aborts the whole load. No
/// partial table is ever returned.
pub fn load_trigram_counts<R: Read>(reader: R) -> CfResult<HashMap<[u8; 3], f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .from_reader(reader);

    let mut counts: HashMap<[u8; 3], u64> = HashMap::new();
    let mut sum: u64 = 0;

    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 1;
        let rec = result?;

        if rec.len() < 2 {
            return Err(CipherForgeError::MalformedRecord {
                line,
                reason: format!("expected 2 fields, got {}", rec.len()),
            });
        }

        let gram_raw = rec[0].trim();
        if gram_raw.len() != 3 || !gram_raw.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(CipherForgeError::MalformedRecord {
                line,
                reason: format!("'{}' is not a 3-letter trigram", gram_raw),
            });
        }

        let mut gram = [0u8; 3];
        for (i, b) in gram_raw.bytes().enumerate() {
            gram[i] = b.to_ascii_uppercase();
        }

        let count: u64 = rec[1].trim().parse().map_err(|_| {
            CipherForgeError::MalformedRecord {
                line,
                reason: format!("count '{}' is not a non-negative integer", &rec[1]),
            }
        })?;

        *counts.entry(gram).or_insert(0) += count;
        sum += count;
    }

    if sum == 0 {
        return Err(CipherForgeError::Config(
            "frequency table is empty or all counts are zero".to_string(),
        ));
    }

    let table = counts
        .into_iter()
        .map(|(gram, count)| (gram, (count as f64 / sum as f64).log10()))
        .collect::<HashMap<_, _>>();

    debug!(trigrams = table.len(), total_count = sum, "loaded trigram table");
    Ok(table)
}
