pub mod colony;
pub mod crossover;
pub mod genetic;
pub mod mutation;
pub mod runner;
pub mod state;
pub mod swarm;
pub mod tabu;

pub use self::colony::AntColonyOptimizer;
pub use self::genetic::GeneticAlgorithmOptimizer;
pub use self::runner::{AlgorithmReport, AccuracySeries, Comparison, Runner};
pub use self::state::SearchState;
pub use self::swarm::ParticleSwarmOptimizer;
pub use self::tabu::TabuSearchOptimizer;

use crate::algorithms::Algorithm;
use crate::error::WfResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum_macros::Display;

/// Flattened network weights: W1, b1, W2, b2.
pub type WeightVector = Vec<f64>;

/// What the algorithm-specific third trace measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    AverageFitness,
    AveragePersonalBest,
    CurrentFitness,
}

/// Per-iteration traces. Each has `iterations + 1` entries after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub best_fitness: Vec<f64>,
    pub best_accuracy: Vec<f64>,
    pub secondary: Vec<f64>,
    pub secondary_kind: TraceKind,
}

impl History {
    pub fn with_capacity(kind: TraceKind, capacity: usize) -> Self {
        Self {
            best_fitness: Vec::with_capacity(capacity),
            best_accuracy: Vec::with_capacity(capacity),
            secondary: Vec::with_capacity(capacity),
            secondary_kind: kind,
        }
    }
}

/// Uniform output of every optimizer run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub algorithm: Algorithm,
    pub best_weights: WeightVector,
    pub best_fitness: f64,
    pub best_accuracy: f64,
    pub history: History,
    pub execution_time: Duration,
}

/// Receives per-iteration updates. Observation only; a run cannot be aborted.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(
        &self,
        algorithm: Algorithm,
        iteration: usize,
        total: usize,
        best_accuracy: f64,
        secondary: f64,
    );
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _: Algorithm, _: usize, _: usize, _: f64, _: f64) {}
}

/// One metaheuristic bound to a landscape. `run` consumes the optimizer, so
/// its working state lives for exactly one search.
pub trait Optimizer {
    fn algorithm(&self) -> Algorithm;

    fn run_observed(self, progress: &dyn ProgressCallback) -> WfResult<RunResult>;

    fn run(self) -> WfResult<RunResult>
    where
        Self: Sized,
    {
        self.run_observed(&NoProgress)
    }
}

/// Index of the highest fitness; the first one wins ties.
pub fn best_index(fitnesses: &[f64]) -> usize {
    let mut best = 0;
    for (i, &f) in fitnesses.iter().enumerate().skip(1) {
        if f > fitnesses[best] {
            best = i;
        }
    }
    best
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Shared progress hook: the callback sees every iteration, the log every tenth.
pub(crate) fn report_iteration(
    progress: &dyn ProgressCallback,
    algorithm: Algorithm,
    iteration: usize,
    total: usize,
    state: &SearchState,
    secondary: f64,
) {
    let acc = state
        .history()
        .best_accuracy
        .last()
        .copied()
        .unwrap_or(state.best_accuracy);
    progress.on_progress(algorithm, iteration, total, acc, secondary);

    if iteration % 10 == 0 {
        tracing::debug!(
            "{} - Iteration {}/{}, Best Accuracy: {:.4}, {}: {:.4}",
            algorithm.label(),
            iteration,
            total,
            acc,
            state.history().secondary_kind,
            secondary
        );
    }
}
