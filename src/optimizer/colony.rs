use super::mutation::make_rng;
use super::{mean, report_iteration, Optimizer, ProgressCallback};
use super::{RunResult, SearchState, TraceKind, WeightVector};
use crate::algorithms::Algorithm;
use crate::config::AcoParams;
use crate::error::WfResult;
use crate::landscape::FitnessLandscape;
use fastrand::Rng;
use std::sync::Arc;
use std::time::Instant;

pub const INITIAL_PHEROMONE: f64 = 0.1;
pub const INITIAL_HEURISTIC: f64 = 1.0;

/// Pheromone and heuristic values over a `dims x grid_points` lattice.
/// Grid point `i` of every dimension stands for
/// `lower + i / (grid_points - 1) * (upper - lower)`.
#[derive(Debug, Clone)]
pub struct PheromoneGrid {
    dims: usize,
    grid_points: usize,
    lower: f64,
    upper: f64,
    pheromones: Vec<f64>,
    heuristic: Vec<f64>,
}

impl PheromoneGrid {
    pub fn new(dims: usize, grid_points: usize, lower: f64, upper: f64) -> Self {
        Self {
            dims,
            grid_points,
            lower,
            upper,
            pheromones: vec![INITIAL_PHEROMONE; dims * grid_points],
            heuristic: vec![INITIAL_HEURISTIC; dims * grid_points],
        }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn grid_points(&self) -> usize {
        self.grid_points
    }

    /// Row-major pheromone cells, `dims x grid_points`.
    pub fn cells(&self) -> &[f64] {
        &self.pheromones
    }

    pub fn pheromone(&self, dim: usize, point: usize) -> f64 {
        self.pheromones[dim * self.grid_points + point]
    }

    pub fn value_at(&self, point: usize) -> f64 {
        self.lower + (point as f64 / (self.grid_points - 1) as f64) * (self.upper - self.lower)
    }

    /// Nearest grid point to `value`, clamped into the grid.
    pub fn index_of(&self, value: f64) -> usize {
        let pos = (value - self.lower) / (self.upper - self.lower) * (self.grid_points - 1) as f64;
        let idx = pos.round();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(self.grid_points - 1)
        }
    }

    /// Samples one grid point of `dim` with probability proportional to
    /// `pheromone^alpha * heuristic^beta`.
    pub fn sample(&self, rng: &mut Rng, dim: usize, alpha: f64, beta: f64) -> usize {
        let start = dim * self.grid_points;
        let end = start + self.grid_points;
        let weights: Vec<f64> = self.pheromones[start..end]
            .iter()
            .zip(&self.heuristic[start..end])
            .map(|(&p, &h)| p.powf(alpha) * h.powf(beta))
            .collect();

        let total: f64 = weights.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            // Fully evaporated row: no trail information left
            return rng.usize(0..self.grid_points);
        }

        let target = rng.f64() * total;
        let mut acc = 0.0;
        for (i, &w) in weights.iter().enumerate() {
            acc += w;
            if acc > target {
                return i;
            }
        }
        // Float rounding left target at the very top
        self.grid_points - 1
    }

    /// One ant's solution: each dimension sampled independently.
    pub fn construct(&self, rng: &mut Rng, alpha: f64, beta: f64) -> WeightVector {
        (0..self.dims)
            .map(|d| self.value_at(self.sample(rng, d, alpha, beta)))
            .collect()
    }

    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for p in self.pheromones.iter_mut() {
            *p *= keep;
        }
    }

    /// Adds `amount` to the cell nearest each coordinate of `solution`.
    pub fn deposit(&mut self, solution: &[f64], amount: f64) {
        for (d, &v) in solution.iter().enumerate() {
            let idx = self.index_of(v);
            self.pheromones[d * self.grid_points + idx] += amount;
        }
    }

    /// Evaporation followed by deposits from every strictly positive fitness.
    /// Returns the number of depositing solutions.
    pub fn update(&mut self, solutions: &[WeightVector], fitnesses: &[f64], rate: f64) -> usize {
        self.evaporate(rate);
        let mut deposits = 0;
        for (solution, &fitness) in solutions.iter().zip(fitnesses) {
            if fitness > 0.0 {
                self.deposit(solution, fitness);
                deposits += 1;
            }
        }
        deposits
    }
}

pub struct AntColonyOptimizer {
    landscape: Arc<FitnessLandscape>,
    params: AcoParams,
    rng: Rng,
}

impl AntColonyOptimizer {
    pub fn new(landscape: Arc<FitnessLandscape>, params: AcoParams, seed: Option<u64>) -> Self {
        Self {
            landscape,
            params,
            rng: make_rng(seed),
        }
    }

    /// Off-grid uniform sample used to seed the global best.
    fn random_solution(&mut self) -> WeightVector {
        let (lo, hi) = (self.params.lower_bound, self.params.upper_bound);
        (0..self.landscape.dimensions())
            .map(|_| lo + self.rng.f64() * (hi - lo))
            .collect()
    }
}

impl Optimizer for AntColonyOptimizer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Aco
    }

    fn run_observed(mut self, progress: &dyn ProgressCallback) -> WfResult<RunResult> {
        self.params.validate()?;
        let start = Instant::now();
        let iterations = self.params.iterations;
        let landscape = self.landscape.clone();
        let alpha = self.params.pheromone_importance;
        let beta = self.params.heuristic_importance;

        tracing::info!(
            "Running Ant Colony Optimization: ant_count={}, iterations={}, pheromone_importance={}, heuristic_importance={}, evaporation_rate={}",
            self.params.ant_count,
            iterations,
            alpha,
            beta,
            self.params.evaporation_rate
        );

        let mut grid = PheromoneGrid::new(
            landscape.dimensions(),
            self.params.grid_points,
            self.params.lower_bound,
            self.params.upper_bound,
        );

        let mut state = SearchState::new(TraceKind::AverageFitness, iterations);
        let seed_solution = self.random_solution();
        let seed_fitness = landscape.fitness(&seed_solution);
        state.offer(&seed_solution, seed_fitness, &landscape);
        state.record(seed_fitness);

        let mut starved = 0usize;
        for iteration in 1..=iterations {
            let mut solutions = Vec::with_capacity(self.params.ant_count);
            let mut fitnesses = Vec::with_capacity(self.params.ant_count);

            for _ in 0..self.params.ant_count {
                let solution = grid.construct(&mut self.rng, alpha, beta);
                let fitness = landscape.fitness(&solution);
                state.offer(&solution, fitness, &landscape);
                solutions.push(solution);
                fitnesses.push(fitness);
            }

            if grid.update(&solutions, &fitnesses, self.params.evaporation_rate) == 0 {
                starved += 1;
            }

            let avg = mean(&fitnesses);
            state.record(avg);
            report_iteration(progress, Algorithm::Aco, iteration, iterations, &state, avg);
        }

        if starved > 0 {
            tracing::debug!(
                "ACO: {} of {} iterations deposited no pheromone (no ant reached positive fitness)",
                starved,
                iterations
            );
        }

        let elapsed = start.elapsed();
        tracing::info!(
            "ACO optimization completed in {:.2} seconds, final accuracy: {:.4}",
            elapsed.as_secs_f64(),
            state.best_accuracy
        );
        Ok(state.into_result(Algorithm::Aco, elapsed))
    }
}
