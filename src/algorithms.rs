use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Ga,
    Pso,
    Aco,
    Tabu,
}

impl Algorithm {
    /// Human-readable label used in reports and plot legends.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ga => "GA",
            Self::Pso => "PSO",
            Self::Aco => "ACO",
            Self::Tabu => "Tabu",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Self::Ga => "Genetic Algorithm",
            Self::Pso => "Particle Swarm Optimization",
            Self::Aco => "Ant Colony Optimization",
            Self::Tabu => "Tabu Search",
        }
    }

    /// Line colour for accuracy plots.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Ga => "blue",
            Self::Pso => "red",
            Self::Aco => "green",
            Self::Tabu => "purple",
        }
    }
}

/// All algorithms in ranking order (earlier wins accuracy ties).
pub fn all_algorithms() -> Vec<Algorithm> {
    Algorithm::iter().collect()
}
