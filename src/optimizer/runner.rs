use super::{
    AntColonyOptimizer, GeneticAlgorithmOptimizer, NoProgress, Optimizer, ParticleSwarmOptimizer,
    ProgressCallback, RunResult, TabuSearchOptimizer,
};
use crate::algorithms::{all_algorithms, Algorithm};
use crate::config::Config;
use crate::error::WfResult;
use crate::landscape::FitnessLandscape;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Per-algorithm record handed to transports and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmReport {
    pub best_accuracy: f64,
    pub accuracy_history: Vec<f64>,
    /// Seconds.
    pub execution_time: f64,
}

impl From<&RunResult> for AlgorithmReport {
    fn from(result: &RunResult) -> Self {
        Self {
            best_accuracy: result.best_accuracy,
            accuracy_history: result.history.best_accuracy.clone(),
            execution_time: result.execution_time.as_secs_f64(),
        }
    }
}

/// Accuracy trace keyed for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracySeries {
    pub label: &'static str,
    pub color: &'static str,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub algorithms: BTreeMap<Algorithm, AlgorithmReport>,
    /// `None` until something has been run.
    pub best_algorithm: Option<Algorithm>,
    pub best_accuracy: f64,
}

impl Comparison {
    /// Builds a comparison from entries in run order. The strictly highest
    /// accuracy wins; on ties the earlier entry is kept.
    ///
    /// Returns `None` when `entries` is empty.
    pub fn rank(entries: Vec<(Algorithm, AlgorithmReport)>) -> Option<Self> {
        let mut best: Option<(Algorithm, f64)> = None;
        for (algo, report) in &entries {
            match best {
                Some((_, acc)) if report.best_accuracy <= acc => {}
                _ => best = Some((*algo, report.best_accuracy)),
            }
        }
        let (best_algorithm, best_accuracy) = best?;

        Some(Self {
            algorithms: entries.into_iter().collect(),
            best_algorithm: Some(best_algorithm),
            best_accuracy,
        })
    }

    /// Placeholder shown before any comparison has been saved: every
    /// algorithm present with an empty history, no winner.
    pub fn empty() -> Self {
        Self {
            algorithms: all_algorithms()
                .into_iter()
                .map(|algo| {
                    let report = AlgorithmReport {
                        best_accuracy: 0.0,
                        accuracy_history: Vec::new(),
                        execution_time: 0.0,
                    };
                    (algo, report)
                })
                .collect(),
            best_algorithm: None,
            best_accuracy: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.best_algorithm.is_none()
    }

    pub fn from_results(results: &[RunResult]) -> Option<Self> {
        Self::rank(
            results
                .iter()
                .map(|r| (r.algorithm, AlgorithmReport::from(r)))
                .collect(),
        )
    }

    pub fn accuracy_series(&self) -> Vec<AccuracySeries> {
        self.algorithms
            .iter()
            .map(|(algo, report)| AccuracySeries {
                label: algo.label(),
                color: algo.color(),
                values: report.accuracy_history.clone(),
            })
            .collect()
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> WfResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!("Saved comparison to {}", path.display());
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> WfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Drives optimizers against one shared landscape.
pub struct Runner {
    landscape: Arc<FitnessLandscape>,
    config: Config,
}

impl Runner {
    pub fn new(landscape: Arc<FitnessLandscape>, config: Config) -> Self {
        Self { landscape, config }
    }

    pub fn landscape(&self) -> &Arc<FitnessLandscape> {
        &self.landscape
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self, algorithm: Algorithm, seed: Option<u64>) -> WfResult<RunResult> {
        self.run_observed(algorithm, seed, &NoProgress)
    }

    pub fn run_observed(
        &self,
        algorithm: Algorithm,
        seed: Option<u64>,
        progress: &dyn ProgressCallback,
    ) -> WfResult<RunResult> {
        let landscape = self.landscape.clone();
        match algorithm {
            Algorithm::Ga => {
                GeneticAlgorithmOptimizer::new(landscape, self.config.ga.clone(), seed)
                    .run_observed(progress)
            }
            Algorithm::Pso => {
                ParticleSwarmOptimizer::new(landscape, self.config.pso.clone(), seed)
                    .run_observed(progress)
            }
            Algorithm::Aco => AntColonyOptimizer::new(landscape, self.config.aco.clone(), seed)
                .run_observed(progress),
            Algorithm::Tabu => TabuSearchOptimizer::new(landscape, self.config.tabu.clone(), seed)
                .run_observed(progress),
        }
    }

    /// Runs every algorithm in canonical order. Run `i` is seeded with
    /// `seed + i` (wrapping), so results do not depend on `parallel`.
    pub fn run_each(
        &self,
        seed: Option<u64>,
        parallel: bool,
        progress: &dyn ProgressCallback,
    ) -> WfResult<Vec<RunResult>> {
        let jobs: Vec<(Algorithm, Option<u64>)> = all_algorithms()
            .into_iter()
            .enumerate()
            .map(|(i, algo)| (algo, seed.map(|s| s.wrapping_add(i as u64))))
            .collect();

        if parallel {
            jobs.par_iter()
                .map(|&(algo, s)| self.run_observed(algo, s, progress))
                .collect()
        } else {
            jobs.iter()
                .map(|&(algo, s)| self.run_observed(algo, s, progress))
                .collect()
        }
    }

    pub fn run_all(&self, seed: Option<u64>, parallel: bool) -> WfResult<Comparison> {
        self.run_all_observed(seed, parallel, &NoProgress)
    }

    pub fn run_all_observed(
        &self,
        seed: Option<u64>,
        parallel: bool,
        progress: &dyn ProgressCallback,
    ) -> WfResult<Comparison> {
        tracing::info!("Running all optimization algorithms (parallel={})", parallel);
        let results = self.run_each(seed, parallel, progress)?;
        let comparison = Comparison::from_results(&results).ok_or_else(|| {
            crate::error::WeightForgeError::Validation("no algorithms were run".into())
        })?;

        for (algo, report) in &comparison.algorithms {
            tracing::info!("{} Best Accuracy: {:.4}", algo.full_name(), report.best_accuracy);
        }
        if let Some(best) = comparison.best_algorithm {
            tracing::info!(
                "{} performed best with accuracy: {:.4}",
                best.label(),
                comparison.best_accuracy
            );
        }
        Ok(comparison)
    }
}
