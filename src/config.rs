use crate::scorer::{parse_unseen_policy, UnseenPolicy};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub model: ModelParams,
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    /// Random keys in the initial generation
    #[arg(long, default_value_t = 3000)]
    pub population_size: usize,

    /// Survivors selected into each breeding round
    #[arg(long, default_value_t = 1000)]
    pub survivors: usize,

    /// Per-candidate chance of a transposition after breeding
    #[arg(long, default_value_t = 0.2)]
    pub mutation_probability: f64,

    /// Stop once the best distance drops below this
    #[arg(long, default_value_t = 0.021)]
    pub convergence_threshold: f64,

    /// Generations between progress reports
    #[arg(long, default_value_t = 100)]
    pub report_interval: usize,

    /// Liveness cap; the search is heuristic and may otherwise never stop
    #[arg(long)]
    pub max_generations: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ModelParams {
    /// Score contribution of trigrams absent from the table:
    /// 'neutral' (reference behavior, contributes 0) or 'floor'
    #[arg(long, default_value = "neutral", value_parser = parse_unseen_policy)]
    pub unseen_policy: UnseenPolicy,

    /// Log10 probability substituted for unseen trigrams under 'floor'
    #[arg(long, default_value_t = -8.0, allow_hyphen_values = true)]
    pub unseen_floor: f64,
}
