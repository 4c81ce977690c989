use super::{History, RunResult, TraceKind, WeightVector};
use crate::algorithms::Algorithm;
use crate::landscape::FitnessLandscape;
use std::time::Duration;

/// Best-so-far bookkeeping shared by every optimizer.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub best_solution: WeightVector,
    pub best_fitness: f64,
    pub best_accuracy: f64,
    history: History,
}

impl SearchState {
    pub fn new(kind: TraceKind, iterations: usize) -> Self {
        Self {
            best_solution: Vec::new(),
            best_fitness: f64::NEG_INFINITY,
            best_accuracy: 0.0,
            history: History::with_capacity(kind, iterations + 1),
        }
    }

    /// Replaces the incumbent iff `fitness` is strictly greater; equal fitness
    /// keeps the first-found solution. Test accuracy is only computed on
    /// replacement.
    pub fn offer(&mut self, candidate: &[f64], fitness: f64, landscape: &FitnessLandscape) -> bool {
        if fitness > self.best_fitness {
            self.best_solution = candidate.to_vec();
            self.best_fitness = fitness;
            self.best_accuracy = landscape.accuracy(candidate);
            true
        } else {
            false
        }
    }

    /// Appends one entry to every trace. The accuracy trace is kept as a
    /// running maximum.
    pub fn record(&mut self, secondary: f64) {
        let acc = match self.history.best_accuracy.last() {
            Some(&prev) if prev > self.best_accuracy => prev,
            _ => self.best_accuracy,
        };
        self.history.best_fitness.push(self.best_fitness);
        self.history.best_accuracy.push(acc);
        self.history.secondary.push(secondary);
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn recorded(&self) -> usize {
        self.history.best_fitness.len()
    }

    pub fn into_result(self, algorithm: Algorithm, execution_time: Duration) -> RunResult {
        RunResult {
            algorithm,
            best_weights: self.best_solution,
            best_fitness: self.best_fitness,
            best_accuracy: self.best_accuracy,
            history: self.history,
            execution_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landscape::{Dataset, Matrix, NetworkTopology};

    fn tiny_landscape() -> FitnessLandscape {
        let features = Matrix::new(2, 1, vec![-1.0, 1.0]).unwrap();
        let data = Dataset::new(features, vec![0, 1]);
        FitnessLandscape::new(NetworkTopology::new(1, 1, 2), data.clone(), data).unwrap()
    }

    #[test]
    fn test_offer_requires_strict_improvement() {
        let land = tiny_landscape();
        let mut state = SearchState::new(TraceKind::CurrentFitness, 2);

        let a = vec![0.1; land.dimensions()];
        let b = vec![0.2; land.dimensions()];

        assert!(state.offer(&a, -1.0, &land));
        assert!(!state.offer(&b, -1.0, &land), "tie must keep first-found");
        assert_eq!(state.best_solution, a);
        assert!(state.offer(&b, -0.5, &land));
        assert_eq!(state.best_solution, b);
    }

    #[test]
    fn test_record_keeps_accuracy_monotone() {
        let mut state = SearchState::new(TraceKind::AverageFitness, 3);
        state.best_accuracy = 0.75;
        state.record(0.0);
        state.best_accuracy = 0.5;
        state.record(0.0);
        state.best_accuracy = 1.0;
        state.record(0.0);

        assert_eq!(state.history().best_accuracy, vec![0.75, 0.75, 1.0]);
        assert_eq!(state.recorded(), 3);
    }
}
