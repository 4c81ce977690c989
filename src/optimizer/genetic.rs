use super::mutation::{self, gaussian_vector, make_rng};
use super::{best_index, crossover, mean, report_iteration, Optimizer, ProgressCallback};
use super::{RunResult, SearchState, TraceKind, WeightVector};
use crate::algorithms::Algorithm;
use crate::config::GaParams;
use crate::error::WfResult;
use crate::landscape::FitnessLandscape;
use fastrand::Rng;
use std::sync::Arc;
use std::time::Instant;

pub const TOURNAMENT_SIZE: usize = 3;
pub const INIT_SCALE: f64 = 0.1;
pub const MUTATION_SCALE: f64 = 0.1;

/// Generational GA with single-individual elitism, tournament selection,
/// single-point crossover and per-gene Gaussian mutation.
pub struct GeneticAlgorithmOptimizer {
    landscape: Arc<FitnessLandscape>,
    params: GaParams,
    rng: Rng,
}

impl GeneticAlgorithmOptimizer {
    pub fn new(landscape: Arc<FitnessLandscape>, params: GaParams, seed: Option<u64>) -> Self {
        Self {
            landscape,
            params,
            rng: make_rng(seed),
        }
    }

    pub fn initialize_population(&mut self) -> Vec<WeightVector> {
        let dims = self.landscape.dimensions();
        (0..self.params.population_size)
            .map(|_| gaussian_vector(&mut self.rng, dims, INIT_SCALE))
            .collect()
    }

    pub fn evaluate(&self, population: &[WeightVector]) -> Vec<f64> {
        population
            .iter()
            .map(|ind| self.landscape.fitness(ind))
            .collect()
    }

    /// Draws `TOURNAMENT_SIZE` individuals with replacement and returns the
    /// index of the fittest; the earliest draw wins ties.
    pub fn tournament_select(&mut self, fitnesses: &[f64]) -> usize {
        let n = fitnesses.len();
        let mut winner = self.rng.usize(0..n);
        for _ in 1..TOURNAMENT_SIZE {
            let challenger = self.rng.usize(0..n);
            if fitnesses[challenger] > fitnesses[winner] {
                winner = challenger;
            }
        }
        winner
    }

    /// Builds the next generation. Slot 0 is an unmodified copy of the
    /// fittest individual.
    pub fn evolve(&mut self, population: &[WeightVector], fitnesses: &[f64]) -> Vec<WeightVector> {
        let mut next = Vec::with_capacity(population.len());
        next.push(population[best_index(fitnesses)].clone());

        for _ in 1..population.len() {
            let p1 = self.tournament_select(fitnesses);
            let p2 = self.tournament_select(fitnesses);

            let mut child =
                crossover::single_point(&population[p1], &population[p2], &mut self.rng);
            mutation::mutate_genes(
                &mut self.rng,
                &mut child,
                self.params.mutation_rate,
                MUTATION_SCALE,
            );
            next.push(child);
        }
        next
    }
}

impl Optimizer for GeneticAlgorithmOptimizer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Ga
    }

    fn run_observed(mut self, progress: &dyn ProgressCallback) -> WfResult<RunResult> {
        self.params.validate()?;
        let start = Instant::now();
        let generations = self.params.generations;
        let landscape = self.landscape.clone();

        tracing::info!(
            "Running Genetic Algorithm: population_size={}, generations={}, mutation_rate={}",
            self.params.population_size,
            generations,
            self.params.mutation_rate
        );

        let mut state = SearchState::new(TraceKind::AverageFitness, generations);
        let mut population = self.initialize_population();
        let mut fitnesses = self.evaluate(&population);

        let bi = best_index(&fitnesses);
        state.offer(&population[bi], fitnesses[bi], &landscape);
        state.record(mean(&fitnesses));

        for generation in 1..=generations {
            population = self.evolve(&population, &fitnesses);
            fitnesses = self.evaluate(&population);
            let avg = mean(&fitnesses);

            let bi = best_index(&fitnesses);
            state.offer(&population[bi], fitnesses[bi], &landscape);
            state.record(avg);

            report_iteration(progress, Algorithm::Ga, generation, generations, &state, avg);
        }

        let elapsed = start.elapsed();
        tracing::info!(
            "GA optimization completed in {:.2} seconds, final accuracy: {:.4}",
            elapsed.as_secs_f64(),
            state.best_accuracy
        );
        Ok(state.into_result(Algorithm::Ga, elapsed))
    }
}
