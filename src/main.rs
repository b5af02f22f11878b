use cipherforge::scorer::FrequencyModel;
use clap::{Parser, Subcommand};
use std::process;
use std::sync::Arc;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tab-separated `trigram<TAB>count` table
    #[arg(global = true, short, long, default_value = "data/english_trigrams.tsv")]
    trigrams: String,

    /// Representative plaintext used for the reference statistic
    #[arg(global = true, short, long, default_value = "data/reference.txt")]
    corpus: String,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Crack(cmd::crack::CrackArgs),
    Score(cmd::score::ScoreArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let model_params = match &cli.command {
        Commands::Crack(args) => args.config.model.clone(),
        Commands::Score(args) => args.model.clone(),
    };

    println!("\n🔐 Initializing CipherForge Core...");
    println!("📂 Trigram table: {}", cli.trigrams);
    println!("📂 Reference corpus: {}", cli.corpus);

    let model = match FrequencyModel::from_files(
        &cli.trigrams,
        &cli.corpus,
        model_params.unseen_policy,
        model_params.unseen_floor,
    ) {
        Ok(m) => Arc::new(m),
        Err(e) => {
            eprintln!("\n❌ FATAL ERROR LOADING LANGUAGE MODEL:");
            eprintln!("   {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Crack(args) => cmd::crack::run(args, model),
        Commands::Score(args) => cmd::score::run(args, model),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        process::exit(1);
    }
}
