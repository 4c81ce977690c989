use super::mutation::{gaussian_vector, make_rng};
use super::{best_index, mean, report_iteration, Optimizer, ProgressCallback};
use super::{RunResult, SearchState, TraceKind, WeightVector};
use crate::algorithms::Algorithm;
use crate::config::PsoParams;
use crate::error::WfResult;
use crate::landscape::FitnessLandscape;
use fastrand::Rng;
use std::sync::Arc;
use std::time::Instant;

/// Per-component velocity limit applied after every velocity update.
pub const MAX_VELOCITY: f64 = 0.1;
pub const POSITION_SCALE: f64 = 0.1;
pub const VELOCITY_SCALE: f64 = 0.01;

/// Particle state. Positions are mutated in place; each particle's cached
/// personal-best fitness only changes when that particle improves.
#[derive(Debug, Clone)]
pub struct Swarm {
    pub positions: Vec<WeightVector>,
    pub velocities: Vec<WeightVector>,
    pub personal_best: Vec<WeightVector>,
    pub personal_best_fitness: Vec<f64>,
}

impl Swarm {
    pub fn initialize(rng: &mut Rng, landscape: &FitnessLandscape, swarm_size: usize) -> Self {
        let dims = landscape.dimensions();
        let positions: Vec<WeightVector> = (0..swarm_size)
            .map(|_| gaussian_vector(rng, dims, POSITION_SCALE))
            .collect();
        let velocities = (0..swarm_size)
            .map(|_| gaussian_vector(rng, dims, VELOCITY_SCALE))
            .collect();
        let personal_best_fitness = positions.iter().map(|p| landscape.fitness(p)).collect();

        Self {
            personal_best: positions.clone(),
            positions,
            velocities,
            personal_best_fitness,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn velocities(&self) -> &[WeightVector] {
        &self.velocities
    }

    /// `v = w*v + c1*r1*(pbest - x) + c2*r2*(gbest - x)`, clamped to
    /// `[-MAX_VELOCITY, MAX_VELOCITY]` per component.
    pub fn update_velocities(&mut self, rng: &mut Rng, params: &PsoParams, global_best: &[f64]) {
        for ((vel, pos), pbest) in self
            .velocities
            .iter_mut()
            .zip(&self.positions)
            .zip(&self.personal_best)
        {
            for d in 0..vel.len() {
                let r1 = rng.f64();
                let r2 = rng.f64();
                let cognitive = params.cognitive_coef * r1 * (pbest[d] - pos[d]);
                let social = params.social_coef * r2 * (global_best[d] - pos[d]);
                let v = params.inertia * vel[d] + cognitive + social;
                vel[d] = v.clamp(-MAX_VELOCITY, MAX_VELOCITY);
            }
        }
    }

    pub fn update_positions(&mut self) {
        for (pos, vel) in self.positions.iter_mut().zip(&self.velocities) {
            for (x, v) in pos.iter_mut().zip(vel) {
                *x += v;
            }
        }
    }

    /// Re-scores every particle and keeps strict improvements. Returns how
    /// many personal bests moved.
    pub fn update_personal_bests(&mut self, landscape: &FitnessLandscape) -> usize {
        let mut improved = 0;
        for i in 0..self.positions.len() {
            let f = landscape.fitness(&self.positions[i]);
            if f > self.personal_best_fitness[i] {
                self.personal_best[i].copy_from_slice(&self.positions[i]);
                self.personal_best_fitness[i] = f;
                improved += 1;
            }
        }
        improved
    }

    /// Offers the fittest personal best as the new global best. Accuracy is
    /// only evaluated when it is accepted.
    pub fn update_global_best(&self, state: &mut SearchState, landscape: &FitnessLandscape) -> bool {
        let bi = best_index(&self.personal_best_fitness);
        state.offer(&self.personal_best[bi], self.personal_best_fitness[bi], landscape)
    }
}

pub struct ParticleSwarmOptimizer {
    landscape: Arc<FitnessLandscape>,
    params: PsoParams,
    rng: Rng,
}

impl ParticleSwarmOptimizer {
    pub fn new(landscape: Arc<FitnessLandscape>, params: PsoParams, seed: Option<u64>) -> Self {
        Self {
            landscape,
            params,
            rng: make_rng(seed),
        }
    }
}

impl Optimizer for ParticleSwarmOptimizer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Pso
    }

    fn run_observed(mut self, progress: &dyn ProgressCallback) -> WfResult<RunResult> {
        self.params.validate()?;
        let start = Instant::now();
        let iterations = self.params.iterations;
        let landscape = self.landscape.clone();

        tracing::info!(
            "Running Particle Swarm Optimization: swarm_size={}, iterations={}, inertia={}, cognitive_coef={}, social_coef={}",
            self.params.swarm_size,
            iterations,
            self.params.inertia,
            self.params.cognitive_coef,
            self.params.social_coef
        );

        let mut state = SearchState::new(TraceKind::AveragePersonalBest, iterations);
        let mut swarm = Swarm::initialize(&mut self.rng, &landscape, self.params.swarm_size);
        swarm.update_global_best(&mut state, &landscape);
        state.record(mean(&swarm.personal_best_fitness));

        for iteration in 1..=iterations {
            swarm.update_velocities(&mut self.rng, &self.params, &state.best_solution);
            swarm.update_positions();
            swarm.update_personal_bests(&landscape);
            swarm.update_global_best(&mut state, &landscape);

            let avg = mean(&swarm.personal_best_fitness);
            state.record(avg);
            report_iteration(progress, Algorithm::Pso, iteration, iterations, &state, avg);
        }

        let elapsed = start.elapsed();
        tracing::info!(
            "PSO optimization completed in {:.2} seconds, final accuracy: {:.4}",
            elapsed.as_secs_f64(),
            state.best_accuracy
        );
        Ok(state.into_result(Algorithm::Pso, elapsed))
    }
}
