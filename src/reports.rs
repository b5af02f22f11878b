use cipherforge::error::CfResult;
use cipherforge::evolution::CrackOutcome;
use cipherforge::key::{Candidate, Score};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;
use std::fs;

fn preview(text: &str, width: usize) -> String {
    if text.len() <= width {
        text.to_string()
    } else {
        format!("{}…", &text[..width])
    }
}

fn score_str(score: &Score) -> String {
    match score.value() {
        Some(v) => format!("{:.6}", v),
        None => "—".to_string(),
    }
}

pub fn print_progress(generation: usize, best: &Candidate, decoded: &str) {
    println!(
        "Gen {:6} | Distance: {} | Key: {}",
        generation,
        score_str(&best.score),
        best.key
    );
    println!("           {}", preview(decoded, 72));
}

pub fn print_crack_report(outcome: &CrackOutcome) {
    println!("\n=== 🏆 FINAL RESULT ===");
    println!(
        "Converged: {} after {} generations",
        if outcome.converged { "yes" } else { "no (stopped early)" },
        outcome.generations
    );
    println!("Key:       {}", outcome.best.key);
    println!("Distance:  {}", score_str(&outcome.best.score));
    println!("Plaintext: {}", outcome.plaintext);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rank", "Distance", "Key", "Decoded"]);

    for (rank, (candidate, decoded)) in outcome.leaderboard.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(score_str(&candidate.score)),
            Cell::new(candidate.key.to_string()),
            Cell::new(preview(decoded, 40)),
        ]);
    }

    println!("\n{table}");
}

#[derive(Serialize)]
struct JsonReport<'a> {
    key: String,
    distance: Option<f64>,
    plaintext: &'a str,
    generations: usize,
    converged: bool,
}

pub fn write_json_report(path: &str, outcome: &CrackOutcome) -> CfResult<()> {
    let report = JsonReport {
        key: outcome.best.key.to_string(),
        distance: outcome.best.score.value(),
        plaintext: &outcome.plaintext,
        generations: outcome.generations,
        converged: outcome.converged,
    };
    fs::write(path, serde_json::to_string_pretty(&report)?)?;
    Ok(())
}
