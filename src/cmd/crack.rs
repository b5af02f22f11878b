use crate::reports;
use cipherforge::codec;
use cipherforge::config::Config;
use cipherforge::error::{CfResult, CipherForgeError};
use cipherforge::evolution::{EvolutionLoop, EvolutionOptions};
use cipherforge::key::Candidate;
use cipherforge::scorer::FrequencyModel;
use clap::Args;
use std::fs;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct CrackArgs {
    #[command(flatten)]
    pub config: Config,

    /// Ciphertext given inline; letters only after normalization
    pub ciphertext: Option<String>,

    /// Read the ciphertext from a file instead
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Write the final report as JSON
    #[arg(long)]
    pub json: Option<String>,
}

pub fn run(args: CrackArgs, model: Arc<FrequencyModel>) -> CfResult<()> {
    let raw = match (&args.ciphertext, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            return Err(CipherForgeError::Config(
                "provide a ciphertext argument or --input <file>".to_string(),
            ))
        }
    };

    let ciphertext = codec::normalize(&raw);
    println!("🔎 Ciphertext: {} letters after normalization", ciphertext.len());

    let options = EvolutionOptions::from_params(&args.config.search, args.seed);
    let engine = EvolutionLoop::new(model, ciphertext, options)?;

    let observer = |generation: usize, best: &Candidate, decoded: &str| {
        reports::print_progress(generation, best, decoded);
        true
    };

    let outcome = engine.run(observer)?;
    reports::print_crack_report(&outcome);

    if let Some(path) = &args.json {
        reports::write_json_report(path, &outcome)?;
        println!("📝 JSON report written to {}", path);
    }

    Ok(())
}
