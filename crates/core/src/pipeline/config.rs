//! Pipeline configuration.
//!
//! A [`PipelineConfig`] can be deserialized from JSON to reproduce an encode
//! run exactly (including the repair seed).

use std::fs;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constraints::ConstraintProfile;
use crate::errors::DnaError;
use crate::repair::DEFAULT_MAX_ATTEMPTS;

/// Default number of Reed-Solomon parity bytes per block.
pub const DEFAULT_NSYM: u8 = 10;

fn default_nsym() -> u8 {
    DEFAULT_NSYM
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DnaError),
}

/// Settings for the optional repair pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairConfig {
    /// Run the repair pass after mapping.
    #[serde(default)]
    pub enabled: bool,
    /// Hard cap on substitutions tried.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Optional RNG seed for reproducible repairs
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RepairConfig {
    /// Generator for one repair run: seeded when `seed` is set, otherwise
    /// drawn from the thread RNG.
    pub fn rng(&self) -> Xoshiro256PlusPlus {
        match self.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::seed_from_u64(rand::rng().random()),
        }
    }
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

/// Everything that determines how a payload becomes nucleotides.
///
/// `nsym` must match between encode and decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Reed-Solomon parity bytes per block
    #[serde(default = "default_nsym")]
    pub nsym: u8,
    /// Constraints enforced by the mapper and the repair pass
    #[serde(default)]
    pub profile: ConstraintProfile,
    #[serde(default)]
    pub repair: RepairConfig,
}

impl PipelineConfig {
    pub fn new(nsym: u8) -> Self {
        Self {
            nsym,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.profile.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            nsym: DEFAULT_NSYM,
            profile: ConstraintProfile::default(),
            repair: RepairConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.nsym, 10);
        assert_eq!(config.profile, ConstraintProfile::default());
        assert!(!config.repair.enabled);
        assert_eq!(config.repair.max_attempts, 1000);
        assert_eq!(config.repair.seed, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PipelineConfig::from_json(r#"{"nsym": 4, "repair": {"enabled": true}}"#)
            .unwrap();
        assert_eq!(config.nsym, 4);
        assert!(config.repair.enabled);
        assert_eq!(config.repair.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.profile, ConstraintProfile::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = PipelineConfig::new(16);
        config.repair.seed = Some(7);
        config.profile.max_homopolymer = 3;

        let json = config.to_json().unwrap();
        assert_eq!(PipelineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_invalid_profile() {
        let err = PipelineConfig::from_json(r#"{"profile": {"max_homopolymer": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(DnaError::InvalidProfile(_))));

        let err = PipelineConfig::from_json(r#"{"profile": {"forbidden_motifs": ["AXA"]}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"nsym": 8}}"#).unwrap();

        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.nsym, 8);

        assert!(matches!(
            PipelineConfig::load("/nonexistent/dnavault.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let repair = RepairConfig {
            seed: Some(42),
            ..RepairConfig::default()
        };
        let a: u64 = repair.rng().random();
        let b: u64 = repair.rng().random();
        assert_eq!(a, b);
    }
}
