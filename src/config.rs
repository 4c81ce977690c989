use crate::error::{WeightForgeError, WfResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub network: NetworkParams,
    #[command(flatten)]
    pub ga: GaParams,
    #[command(flatten)]
    pub pso: PsoParams,
    #[command(flatten)]
    pub aco: AcoParams,
    #[command(flatten)]
    pub tabu: TabuParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkParams {
    #[arg(long, default_value_t = 8)]
    pub hidden_size: usize,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self { hidden_size: 8 }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GaParams {
    #[arg(long, default_value_t = 50)]
    pub population_size: usize,
    #[arg(long, default_value_t = 100)]
    pub generations: usize,
    #[arg(long, default_value_t = 0.1)]
    pub mutation_rate: f64,
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.1,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PsoParams {
    #[arg(long, default_value_t = 30)]
    pub swarm_size: usize,
    #[arg(long = "pso-iterations", id = "pso_iterations", default_value_t = 100)]
    pub iterations: usize,
    #[arg(long, default_value_t = 0.7)]
    pub inertia: f64,
    #[arg(long, default_value_t = 1.5)]
    pub cognitive_coef: f64,
    #[arg(long, default_value_t = 1.5)]
    pub social_coef: f64,
}

impl Default for PsoParams {
    fn default() -> Self {
        Self {
            swarm_size: 30,
            iterations: 100,
            inertia: 0.7,
            cognitive_coef: 1.5,
            social_coef: 1.5,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AcoParams {
    #[arg(long, default_value_t = 20)]
    pub ant_count: usize,
    #[arg(long = "aco-iterations", id = "aco_iterations", default_value_t = 100)]
    pub iterations: usize,
    #[arg(long, default_value_t = 1.0)]
    pub pheromone_importance: f64,
    #[arg(long, default_value_t = 2.0)]
    pub heuristic_importance: f64,
    #[arg(long, default_value_t = 0.5)]
    pub evaporation_rate: f64,
    #[arg(long, default_value_t = 20)]
    pub grid_points: usize,
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    pub lower_bound: f64,
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub upper_bound: f64,
}

impl Default for AcoParams {
    fn default() -> Self {
        Self {
            ant_count: 20,
            iterations: 100,
            pheromone_importance: 1.0,
            heuristic_importance: 2.0,
            evaporation_rate: 0.5,
            grid_points: 20,
            lower_bound: -1.0,
            upper_bound: 1.0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TabuParams {
    #[arg(long = "tabu-iterations", id = "tabu_iterations", default_value_t = 100)]
    pub iterations: usize,
    #[arg(long, default_value_t = 10)]
    pub tabu_list_size: usize,
    #[arg(long, default_value_t = 20)]
    pub neighborhood_size: usize,
    #[arg(long, default_value_t = 0.1)]
    pub step_size: f64,
}

impl Default for TabuParams {
    fn default() -> Self {
        Self {
            iterations: 100,
            tabu_list_size: 10,
            neighborhood_size: 20,
            step_size: 0.1,
        }
    }
}

fn invalid(msg: String) -> WeightForgeError {
    WeightForgeError::Validation(msg)
}

fn require_positive(name: &str, value: usize) -> WfResult<()> {
    if value == 0 {
        return Err(invalid(format!("{} must be at least 1", name)));
    }
    Ok(())
}

fn require_unit_interval(name: &str, value: f64) -> WfResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(format!("{} must be in [0, 1], got {}", name, value)));
    }
    Ok(())
}

fn require_finite(name: &str, value: f64) -> WfResult<()> {
    if !value.is_finite() {
        return Err(invalid(format!("{} must be finite, got {}", name, value)));
    }
    Ok(())
}

impl NetworkParams {
    pub fn validate(&self) -> WfResult<()> {
        require_positive("hidden_size", self.hidden_size)
    }
}

impl GaParams {
    pub fn validate(&self) -> WfResult<()> {
        require_positive("population_size", self.population_size)?;
        require_unit_interval("mutation_rate", self.mutation_rate)
    }
}

impl PsoParams {
    pub fn validate(&self) -> WfResult<()> {
        require_positive("swarm_size", self.swarm_size)?;
        require_finite("inertia", self.inertia)?;
        require_finite("cognitive_coef", self.cognitive_coef)?;
        require_finite("social_coef", self.social_coef)
    }
}

impl AcoParams {
    pub fn validate(&self) -> WfResult<()> {
        require_positive("ant_count", self.ant_count)?;
        require_unit_interval("evaporation_rate", self.evaporation_rate)?;
        require_finite("pheromone_importance", self.pheromone_importance)?;
        require_finite("heuristic_importance", self.heuristic_importance)?;
        if self.grid_points < 2 {
            return Err(invalid(format!(
                "grid_points must be at least 2, got {}",
                self.grid_points
            )));
        }
        if !(self.lower_bound < self.upper_bound) {
            return Err(invalid(format!(
                "lower_bound ({}) must be below upper_bound ({})",
                self.lower_bound, self.upper_bound
            )));
        }
        Ok(())
    }
}

impl TabuParams {
    pub fn validate(&self) -> WfResult<()> {
        // tabu_list_size = 0 is allowed and turns the memory off
        require_positive("neighborhood_size", self.neighborhood_size)?;
        if !(self.step_size > 0.0 && self.step_size.is_finite()) {
            return Err(invalid(format!(
                "step_size must be positive, got {}",
                self.step_size
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> WfResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            WeightForgeError::Config(format!(
                "Could not read config '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> WfResult<()> {
        self.network.validate()?;
        self.ga.validate()?;
        self.pso.validate()?;
        self.aco.validate()?;
        self.tabu.validate()
    }

    /// Overlays the values the user typed on the command line. Defaults that
    /// clap filled in do not override values loaded from a file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident, $arg_id:expr) => {
                if matches.value_source($arg_id) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(network.hidden_size, "hidden_size");

        update_if_present!(ga.population_size, "population_size");
        update_if_present!(ga.generations, "generations");
        update_if_present!(ga.mutation_rate, "mutation_rate");

        update_if_present!(pso.swarm_size, "swarm_size");
        update_if_present!(pso.iterations, "pso_iterations");
        update_if_present!(pso.inertia, "inertia");
        update_if_present!(pso.cognitive_coef, "cognitive_coef");
        update_if_present!(pso.social_coef, "social_coef");

        update_if_present!(aco.ant_count, "ant_count");
        update_if_present!(aco.iterations, "aco_iterations");
        update_if_present!(aco.pheromone_importance, "pheromone_importance");
        update_if_present!(aco.heuristic_importance, "heuristic_importance");
        update_if_present!(aco.evaporation_rate, "evaporation_rate");
        update_if_present!(aco.grid_points, "grid_points");
        update_if_present!(aco.lower_bound, "lower_bound");
        update_if_present!(aco.upper_bound, "upper_bound");

        update_if_present!(tabu.iterations, "tabu_iterations");
        update_if_present!(tabu.tabu_list_size, "tabu_list_size");
        update_if_present!(tabu.neighborhood_size, "neighborhood_size");
        update_if_present!(tabu.step_size, "step_size");
    }
}
