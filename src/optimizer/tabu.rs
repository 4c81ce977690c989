use super::mutation::{gaussian_vector, make_rng, perturb};
use super::{best_index, report_iteration, Optimizer, ProgressCallback};
use super::{RunResult, SearchState, TraceKind, WeightVector};
use crate::algorithms::Algorithm;
use crate::config::TabuParams;
use crate::error::WfResult;
use crate::landscape::FitnessLandscape;
use fastrand::Rng;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

pub const INIT_SCALE: f64 = 0.1;

/// The coordinate that changed most between two solutions, and which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabuMove {
    pub dimension: usize,
    pub direction: i8,
}

/// Derives the move from `current` to `neighbor`: the largest-magnitude
/// coordinate delta (lowest index on ties), signed +1 if it increased.
pub fn move_between(current: &[f64], neighbor: &[f64]) -> TabuMove {
    let mut dimension = 0;
    let mut largest = f64::NEG_INFINITY;
    for (d, (&c, &n)) in current.iter().zip(neighbor).enumerate() {
        let mag = (n - c).abs();
        if mag > largest {
            largest = mag;
            dimension = d;
        }
    }
    let direction = if neighbor[dimension] - current[dimension] > 0.0 {
        1
    } else {
        -1
    };
    TabuMove {
        dimension,
        direction,
    }
}

/// Bounded FIFO of recent moves; the oldest is evicted at capacity. A
/// capacity of zero stores nothing, so no move is ever tabu.
#[derive(Debug, Clone)]
pub struct TabuMemory {
    capacity: usize,
    moves: VecDeque<TabuMove>,
}

impl TabuMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            moves: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, mv: TabuMove) {
        if self.capacity == 0 {
            return;
        }
        if self.moves.len() == self.capacity {
            self.moves.pop_front();
        }
        self.moves.push_back(mv);
    }

    pub fn contains(&self, mv: &TabuMove) -> bool {
        self.moves.contains(mv)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TabuMove> {
        self.moves.iter()
    }
}

/// Picks the fittest neighbor whose move is not tabu, or whose fitness beats
/// `best_fitness` (aspiration). Falls back to the fittest neighbor overall
/// when nothing qualifies. Returns the index and its move.
pub fn select_neighbor(
    current: &[f64],
    neighbors: &[WeightVector],
    fitnesses: &[f64],
    memory: &TabuMemory,
    best_fitness: f64,
) -> (usize, TabuMove) {
    let mut chosen: Option<usize> = None;
    let mut chosen_fitness = f64::NEG_INFINITY;

    for (i, (neighbor, &fitness)) in neighbors.iter().zip(fitnesses).enumerate() {
        let mv = move_between(current, neighbor);
        let admissible = !memory.contains(&mv) || fitness > best_fitness;
        if admissible && fitness > chosen_fitness {
            chosen = Some(i);
            chosen_fitness = fitness;
        }
    }

    let idx = chosen.unwrap_or_else(|| best_index(fitnesses));
    (idx, move_between(current, &neighbors[idx]))
}

/// Single-solution local search with a short-term move memory. The best
/// admissible neighbor is always accepted, even when it is worse.
pub struct TabuSearchOptimizer {
    landscape: Arc<FitnessLandscape>,
    params: TabuParams,
    rng: Rng,
}

impl TabuSearchOptimizer {
    pub fn new(landscape: Arc<FitnessLandscape>, params: TabuParams, seed: Option<u64>) -> Self {
        Self {
            landscape,
            params,
            rng: make_rng(seed),
        }
    }

    pub fn generate_neighbors(&mut self, current: &[f64]) -> Vec<WeightVector> {
        (0..self.params.neighborhood_size)
            .map(|_| perturb(&mut self.rng, current, self.params.step_size))
            .collect()
    }
}

impl Optimizer for TabuSearchOptimizer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Tabu
    }

    fn run_observed(mut self, progress: &dyn ProgressCallback) -> WfResult<RunResult> {
        self.params.validate()?;
        let start = Instant::now();
        let iterations = self.params.iterations;
        let landscape = self.landscape.clone();

        tracing::info!(
            "Running Tabu Search: iterations={}, tabu_list_size={}, neighborhood_size={}, step_size={}",
            iterations,
            self.params.tabu_list_size,
            self.params.neighborhood_size,
            self.params.step_size
        );

        let mut state = SearchState::new(TraceKind::CurrentFitness, iterations);
        let mut memory = TabuMemory::new(self.params.tabu_list_size);

        let mut current = gaussian_vector(&mut self.rng, landscape.dimensions(), INIT_SCALE);
        let mut current_fitness = landscape.fitness(&current);
        state.offer(&current, current_fitness, &landscape);
        state.record(current_fitness);

        for iteration in 1..=iterations {
            let neighbors = self.generate_neighbors(&current);
            let fitnesses: Vec<f64> = neighbors.iter().map(|n| landscape.fitness(n)).collect();

            let (idx, mv) =
                select_neighbor(&current, &neighbors, &fitnesses, &memory, state.best_fitness);
            memory.push(mv);

            current_fitness = fitnesses[idx];
            current = neighbors.into_iter().nth(idx).unwrap_or(current);

            state.offer(&current, current_fitness, &landscape);
            state.record(current_fitness);
            report_iteration(
                progress,
                Algorithm::Tabu,
                iteration,
                iterations,
                &state,
                current_fitness,
            );
        }

        let elapsed = start.elapsed();
        tracing::info!(
            "Tabu Search completed in {:.2} seconds, final accuracy: {:.4}",
            elapsed.as_secs_f64(),
            state.best_accuracy
        );
        Ok(state.into_result(Algorithm::Tabu, elapsed))
    }
}
