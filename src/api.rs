use crate::algorithms::Algorithm;
use crate::config::{AcoParams, Config, GaParams, PsoParams, TabuParams};
use crate::error::{WeightForgeError, WfResult};
use crate::landscape::FitnessLandscape;
use crate::optimizer::{AlgorithmReport, Comparison, Runner};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use tracing::info;

type LandscapeLoader = Box<dyn Fn() -> WfResult<FitnessLandscape> + Send + Sync>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Status {
    pub status: String,
    pub message: String,
}

/// State behind a transport surface. The landscape is built on first use and
/// shared by every request afterwards.
pub struct EngineContext {
    loader: LandscapeLoader,
    landscape: OnceLock<Arc<FitnessLandscape>>,
    results_path: Option<PathBuf>,
    seed: Option<u64>,
}

impl EngineContext {
    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn() -> WfResult<FitnessLandscape> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            landscape: OnceLock::new(),
            results_path: None,
            seed: None,
        }
    }

    pub fn from_csv(path: impl Into<PathBuf>, test_size: f64, split_seed: u64, hidden_size: usize) -> Self {
        let path = path.into();
        Self::with_loader(move || FitnessLandscape::from_csv(&path, test_size, split_seed, hidden_size))
    }

    /// Context over the bundled Iris dataset; needs no input file.
    pub fn iris(test_size: f64, split_seed: u64, hidden_size: usize) -> Self {
        Self::with_loader(move || FitnessLandscape::iris(test_size, split_seed, hidden_size))
    }

    /// Context over an already built landscape.
    pub fn with_landscape(landscape: Arc<FitnessLandscape>) -> Self {
        let ctx = Self::with_loader(|| {
            Err(WeightForgeError::Config("landscape was preloaded".into()))
        });
        let _ = ctx.landscape.set(landscape);
        ctx
    }

    /// Every completed comparison is also written here.
    pub fn save_results_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.results_path = Some(path.into());
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.landscape.get().is_some()
    }

    pub fn landscape(&self) -> WfResult<Arc<FitnessLandscape>> {
        if let Some(existing) = self.landscape.get() {
            return Ok(existing.clone());
        }
        let built = Arc::new((self.loader)()?);
        // A concurrent first request may have won; either copy is equivalent.
        Ok(self.landscape.get_or_init(|| built).clone())
    }

    /// Runs one algorithm. `params` is a partial JSON object of that
    /// algorithm's hyperparameters; missing keys take their defaults.
    pub fn run_algorithm(&self, name: &str, params: Value) -> WfResult<AlgorithmReport> {
        let algorithm = Algorithm::from_str(name)
            .map_err(|_| WeightForgeError::Validation(format!("Unknown algorithm '{}'", name)))?;

        let mut config = Config::default();
        match algorithm {
            Algorithm::Ga => config.ga = parse_section::<GaParams>(params)?,
            Algorithm::Pso => config.pso = parse_section::<PsoParams>(params)?,
            Algorithm::Aco => config.aco = parse_section::<AcoParams>(params)?,
            Algorithm::Tabu => config.tabu = parse_section::<TabuParams>(params)?,
        }

        info!("API: running {}", algorithm.full_name());
        let runner = Runner::new(self.landscape()?, config);
        let result = runner.run(algorithm, self.seed)?;
        Ok(AlgorithmReport::from(&result))
    }

    /// Runs all four algorithms from `{ga:{..}, pso:{..}, aco:{..}, tabu:{..}}`.
    pub fn run_all(&self, body: Value) -> WfResult<Comparison> {
        let config = parse_section::<Config>(body)?;
        let runner = Runner::new(self.landscape()?, config);
        let comparison = runner.run_all(self.seed, false)?;

        if let Some(path) = &self.results_path {
            comparison.save_json(path)?;
        }
        Ok(comparison)
    }

    /// The last saved comparison, or [`Comparison::empty`] when nothing has
    /// been saved yet.
    pub fn results(&self) -> WfResult<Comparison> {
        match &self.results_path {
            Some(path) if path.exists() => Comparison::load_json(path),
            _ => Ok(Comparison::empty()),
        }
    }

    pub fn status(&self) -> Status {
        let message = if self.is_loaded() {
            "Optimization engine is running (dataset loaded)"
        } else {
            "Optimization engine is running"
        };
        Status {
            status: "ok".to_string(),
            message: message.to_string(),
        }
    }
}

fn parse_section<T: DeserializeOwned + Default>(value: Value) -> WfResult<T> {
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value)?)
}
