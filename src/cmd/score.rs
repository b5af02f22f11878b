use cipherforge::codec;
use cipherforge::config::ModelParams;
use cipherforge::error::{CfResult, CipherForgeError};
use cipherforge::scorer::FrequencyModel;
use clap::Args;
use std::fs;
use std::sync::Arc;

/// Scores arbitrary text against the language model. This is the primitive
/// the shift/Vigenère tooling ranks its candidate decodings with.
#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub model: ModelParams,

    /// Text given inline
    pub text: Option<String>,

    /// Read the text from a file instead
    #[arg(short, long)]
    pub input: Option<String>,
}

pub fn run(args: ScoreArgs, model: Arc<FrequencyModel>) -> CfResult<()> {
    let raw = match (&args.text, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            return Err(CipherForgeError::Config(
                "provide a text argument or --input <file>".to_string(),
            ))
        }
    };

    let text = codec::normalize(&raw);
    let score = model.score(&text)?;
    let distance = model.distance(&text)?;

    println!("\n=== 📊 TRIGRAM SCORE ===");
    println!("Length:    {} letters", text.len());
    println!("Score:     {:.6}", score);
    println!("Reference: {:.6}", model.reference());
    println!("Distance:  {:.6}", distance);

    Ok(())
}
