//! Configuration System
//!
//! Loads model parameters from config.toml for easy adjustment without
//! recompiling. All parameters are validated once, before the first world is
//! constructed; structural problems (such as citizens configured without any
//! journalists to read) are rejected here rather than failing mid-run.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::SimError;

/// Default parameter file path
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub grid: GridConfig,
    pub population: PopulationConfig,
    pub scientist: ScientistConfig,
    pub journalist: JournalistConfig,
    pub citizen: CitizenConfig,
    pub policymaker: PolicymakerConfig,
}

/// Run-shape parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of independent replicates to run back-to-back
    pub replicates: u32,
    /// Steps per replicate
    pub steps: u64,
}

/// Spatial grid parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    /// 8-connected (Moore) neighborhood when true, 4-connected otherwise
    pub moore: bool,
    /// Whether the center cell counts as its own neighbor
    pub include_center: bool,
}

/// Per-role population counts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub scientists: u32,
    pub journalists: u32,
    pub propagandists: u32,
    pub citizens: u32,
    pub policymakers: u32,
}

/// Scientist evidence-accumulation parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScientistConfig {
    /// Inclusive range for the integer alpha hyperparameter drawn at creation
    pub prior_alpha_low: u32,
    pub prior_alpha_high: u32,
    /// Inclusive range for the integer beta hyperparameter drawn at creation
    pub prior_beta_low: u32,
    pub prior_beta_high: u32,
    /// Inclusive range for the per-agent study sample size, fixed at creation
    pub sample_size_low: u32,
    pub sample_size_high: u32,
    /// Maximum belief difference below which a peer is credible
    pub difference_threshold: f64,
    /// Bernoulli trial probability for evidence generation. When absent,
    /// each scientist draws the probability from its own prior instead
    /// (self-confirming mode).
    pub ground_truth_probability: Option<f64>,
}

/// Journalist story-synthesis parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JournalistConfig {
    /// Probability that one propagandist story contaminates a story draft
    pub propaganda_exposure_probability: f64,
}

/// Citizen pipeline parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CitizenConfig {
    /// Maximum belief difference below which a partner's view is adopted
    pub difference_threshold: f64,
    /// Probability of encountering propaganda in a step
    pub propaganda_exposure_probability: f64,
}

/// Policymaker pipeline parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicymakerConfig {
    /// Maximum belief difference below which a peer's view is adopted
    pub difference_threshold: f64,
    /// Probability of encountering propaganda in a step. The source model
    /// exposed every policymaker every step, hence the default of 1.0.
    pub propaganda_exposure_probability: f64,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the given path, or use defaults if it cannot
    /// be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path.as_ref()).unwrap_or_else(|e| {
            tracing::warn!(
                "could not load {}: {}. Using defaults.",
                path.as_ref().display(),
                e
            );
            Self::default()
        })
    }

    /// Reject configurations that would fail mid-run. Structural role
    /// dependencies are enforced here so a missing population surfaces at
    /// construction, never as a sampling failure on some later step.
    pub fn validate(&self) -> Result<(), SimError> {
        let p = &self.population;

        if self.simulation.replicates == 0 {
            return Err(SimError::InvalidConfig("replicates must be at least 1".into()));
        }
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(SimError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }

        // Structural role dependencies.
        if (p.journalists > 0 || p.propagandists > 0) && p.scientists == 0 {
            return Err(SimError::InvalidConfig(
                "journalists and propagandists consult scientists; configure at least one scientist"
                    .into(),
            ));
        }
        if (p.citizens > 0 || p.policymakers > 0) && p.journalists == 0 {
            return Err(SimError::InvalidConfig(
                "citizens and policymakers read journalist stories; configure at least one journalist"
                    .into(),
            ));
        }
        if (p.citizens > 0 || p.policymakers > 0) && p.propagandists == 0 {
            return Err(SimError::InvalidConfig(
                "citizens and policymakers encounter propaganda; configure at least one propagandist"
                    .into(),
            ));
        }
        if p.journalists > 0
            && self.journalist.propaganda_exposure_probability > 0.0
            && p.propagandists == 0
        {
            return Err(SimError::InvalidConfig(
                "journalist propaganda exposure is positive but no propagandists are configured"
                    .into(),
            ));
        }

        // Scientist hyperparameter ranges.
        let s = &self.scientist;
        if s.prior_alpha_low == 0 || s.prior_beta_low == 0 {
            return Err(SimError::InvalidConfig(
                "beta prior hyperparameters must be at least 1".into(),
            ));
        }
        if s.prior_alpha_low > s.prior_alpha_high || s.prior_beta_low > s.prior_beta_high {
            return Err(SimError::InvalidConfig(
                "beta prior hyperparameter ranges must be low <= high".into(),
            ));
        }
        if s.sample_size_low == 0 || s.sample_size_low > s.sample_size_high {
            return Err(SimError::InvalidConfig(
                "study sample size range must be 1 <= low <= high".into(),
            ));
        }

        for (name, value) in [
            ("scientist.difference_threshold", s.difference_threshold),
            ("citizen.difference_threshold", self.citizen.difference_threshold),
            (
                "policymaker.difference_threshold",
                self.policymaker.difference_threshold,
            ),
            (
                "journalist.propaganda_exposure_probability",
                self.journalist.propaganda_exposure_probability,
            ),
            (
                "citizen.propaganda_exposure_probability",
                self.citizen.propaganda_exposure_probability,
            ),
            (
                "policymaker.propaganda_exposure_probability",
                self.policymaker.propaganda_exposure_probability,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if let Some(truth) = s.ground_truth_probability {
            if !(0.0..=1.0).contains(&truth) {
                return Err(SimError::InvalidConfig(format!(
                    "scientist.ground_truth_probability must be in [0, 1], got {truth}"
                )));
            }
        }

        Ok(())
    }

    /// Total agent count across all roles
    pub fn total_agents(&self) -> u32 {
        let p = &self.population;
        p.scientists + p.journalists + p.propagandists + p.citizens + p.policymakers
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            replicates: 10,
            steps: 100,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            moore: true,
            include_center: false,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            scientists: 30,
            journalists: 10,
            propagandists: 5,
            citizens: 100,
            policymakers: 20,
        }
    }
}

impl Default for ScientistConfig {
    fn default() -> Self {
        Self {
            prior_alpha_low: 1,
            prior_alpha_high: 10,
            prior_beta_low: 1,
            prior_beta_high: 10,
            sample_size_low: 10,
            sample_size_high: 100,
            difference_threshold: 0.2,
            ground_truth_probability: Some(0.7),
        }
    }
}

impl Default for JournalistConfig {
    fn default() -> Self {
        Self {
            propaganda_exposure_probability: 0.3,
        }
    }
}

impl Default for CitizenConfig {
    fn default() -> Self {
        Self {
            difference_threshold: 0.2,
            propaganda_exposure_probability: 0.8,
        }
    }
}

impl Default for PolicymakerConfig {
    fn default() -> Self {
        Self {
            difference_threshold: 0.2,
            propaganda_exposure_probability: 1.0,
        }
    }
}
