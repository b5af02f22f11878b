//! The generation loop: select survivors, breed, mutate, re-rank, check
//! convergence. Owns the single seedable RNG and the working population.

use crate::breeder;
use crate::codec;
use crate::config::SearchParams;
use crate::error::{CfResult, CipherForgeError};
use crate::key::{Candidate, Score};
use crate::population;
use crate::scorer::FrequencyModel;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct EvolutionOptions {
    pub population_size: usize,
    pub survivors: usize,
    pub mutation_probability: f64,
    pub convergence_threshold: f64,
    pub report_interval: usize,
    pub max_generations: Option<usize>,
    pub seed: Option<u64>,
}

impl EvolutionOptions {
    pub fn from_params(params: &SearchParams, seed: Option<u64>) -> Self {
        Self {
            population_size: params.population_size,
            survivors: params.survivors,
            mutation_probability: params.mutation_probability,
            convergence_threshold: params.convergence_threshold,
            report_interval: params.report_interval,
            max_generations: params.max_generations,
            seed,
        }
    }

    fn validate(&self) -> CfResult<()> {
        if self.population_size < 2 {
            return Err(CipherForgeError::Config(
                "population_size must be at least 2".to_string(),
            ));
        }
        if self.survivors < 2 {
            return Err(CipherForgeError::Config(
                "survivors must be at least 2 (crossover needs distinct parents)".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(CipherForgeError::Config(
                "mutation_probability must be within [0, 1]".to_string(),
            ));
        }
        if self.convergence_threshold <= 0.0 {
            return Err(CipherForgeError::Config(
                "convergence_threshold must be positive".to_string(),
            ));
        }
        if self.report_interval == 0 {
            return Err(CipherForgeError::Config(
                "report_interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Receives updates during the search, once every `report_interval`
/// generations. Returning `false` aborts the run between generations.
pub trait ProgressObserver: Send + Sync {
    fn on_generation(&self, generation: usize, best: &Candidate, decoded: &str) -> bool;
}

impl<F> ProgressObserver for F
where
    F: Fn(usize, &Candidate, &str) -> bool + Send + Sync,
{
    fn on_generation(&self, generation: usize, best: &Candidate, decoded: &str) -> bool {
        self(generation, best, decoded)
    }
}

/// Outcome of a run. `converged` is false when the generation cap or the
/// observer stopped the search before the threshold was reached.
#[derive(Debug, Clone)]
pub struct CrackOutcome {
    pub best: Candidate,
    pub plaintext: String,
    pub generations: usize,
    pub converged: bool,
    /// Top final candidates with their decoded texts.
    pub leaderboard: Vec<(Candidate, String)>,
}

pub struct EvolutionLoop {
    model: Arc<FrequencyModel>,
    ciphertext: Vec<u8>,
    options: EvolutionOptions,
}

impl EvolutionLoop {
    pub fn new(
        model: Arc<FrequencyModel>,
        ciphertext: Vec<u8>,
        options: EvolutionOptions,
    ) -> CfResult<Self> {
        options.validate()?;
        if ciphertext.len() < 3 {
            return Err(CipherForgeError::TextTooShort(ciphertext.len()));
        }
        Ok(Self {
            model,
            ciphertext,
            options,
        })
    }

    pub fn run<O: ProgressObserver>(&self, observer: O) -> CfResult<CrackOutcome> {
        let opts = &self.options;
        let mut rng = match opts.seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        info!(
            population = opts.population_size,
            survivors = opts.survivors,
            threshold = opts.convergence_threshold,
            "starting evolution"
        );

        let mut pop = breeder::random_population(&mut rng, opts.population_size);
        pop = population::select_best(&self.model, &self.ciphertext, &pop, pop.len())?;
        let mut best = pop[0].clone();

        let mut generation = 0usize;
        let mut aborted = false;

        while self.distance_of(&best)? >= opts.convergence_threshold {
            if let Some(cap) = opts.max_generations {
                if generation >= cap {
                    debug!(generation, "generation cap reached");
                    aborted = true;
                    break;
                }
            }

            if generation % opts.report_interval == 0 {
                let decoded = codec::decode(&self.ciphertext, &best.key)?;
                let decoded = String::from_utf8_lossy(&decoded).into_owned();
                if !observer.on_generation(generation, &best, &decoded) {
                    debug!(generation, "observer requested stop");
                    aborted = true;
                    break;
                }
            }

            let survivors =
                population::select_best(&self.model, &self.ciphertext, &pop, opts.survivors)?;
            let mut pool = breeder::cross_population(&mut rng, &survivors);
            breeder::mutate_population(&mut rng, &mut pool, opts.mutation_probability);
            pop = population::select_best(&self.model, &self.ciphertext, &pool, pool.len())?;
            best = pop[0].clone();
            generation += 1;
        }

        let plaintext_bytes = codec::decode(&self.ciphertext, &best.key)?;
        let plaintext = String::from_utf8_lossy(&plaintext_bytes).into_owned();

        let mut leaderboard = Vec::with_capacity(5);
        for candidate in pop.into_iter().take(5) {
            let decoded = codec::decode(&self.ciphertext, &candidate.key)?;
            leaderboard.push((candidate, String::from_utf8_lossy(&decoded).into_owned()));
        }

        info!(
            generation,
            converged = !aborted,
            key = %best.key,
            "evolution finished"
        );

        Ok(CrackOutcome {
            best,
            plaintext,
            generations: generation,
            converged: !aborted,
            leaderboard,
        })
    }

    fn distance_of(&self, candidate: &Candidate) -> CfResult<f64> {
        match candidate.score {
            Score::Scored(v) => Ok(v),
            Score::Unevaluated => {
                let decoded = codec::decode(&self.ciphertext, &candidate.key)?;
                self.model.distance(&decoded)
            }
        }
    }
}
