//! Ant and colony parameters.

use formica_core::error::{FormicaError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters of a single ant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntConfig {
    pub name: String,
    /// Known food pheromones above this are not good enough; the ant
    /// explores unrated trails instead.
    #[serde(default = "default_impatience")]
    pub impatience: i64,
    /// How long the ant can wait on a trail for a full clearing before it is
    /// discovered and eaten, in milliseconds.
    #[serde(default = "default_disguise_ms")]
    pub disguise_ms: u64,
    /// Seed for route tie-breaking; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AntConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            impatience: default_impatience(),
            disguise_ms: default_disguise_ms(),
            seed: None,
        }
    }

    pub fn with_impatience(mut self, impatience: i64) -> Self {
        self.impatience = impatience;
        self
    }

    pub fn with_disguise(mut self, disguise: Duration) -> Self {
        self.disguise_ms = disguise.as_millis() as u64;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn disguise(&self) -> Duration {
        Duration::from_millis(self.disguise_ms)
    }
}

/// Parameters for a homogeneous colony.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColonyConfig {
    /// Number of ants to spawn (default: 8).
    #[serde(default = "default_ant_count")]
    pub ant_count: usize,
    /// Impatience shared by every ant (default: 10).
    #[serde(default = "default_impatience")]
    pub impatience: i64,
    /// Disguise shared by every ant, in milliseconds (default: 200).
    #[serde(default = "default_disguise_ms")]
    pub disguise_ms: u64,
    /// Base seed; ant `i` gets `seed + i`.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            ant_count: default_ant_count(),
            impatience: default_impatience(),
            disguise_ms: default_disguise_ms(),
            seed: None,
        }
    }
}

impl ColonyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ant_count == 0 {
            return Err(FormicaError::invalid_config(
                "ant_count",
                "0",
                "at least one ant is required",
            ));
        }
        if self.impatience < 0 {
            return Err(FormicaError::invalid_config(
                "impatience",
                self.impatience.to_string(),
                "must not be negative",
            ));
        }
        Ok(())
    }

    /// One config per ant, named `ant-0`, `ant-1`, ...
    pub fn ants(&self) -> Result<Vec<AntConfig>> {
        self.validate()?;
        Ok((0..self.ant_count)
            .map(|i| AntConfig {
                name: format!("ant-{}", i),
                impatience: self.impatience,
                disguise_ms: self.disguise_ms,
                seed: self.seed.map(|s| s.wrapping_add(i as u64)),
            })
            .collect())
    }
}

// Default value functions
fn default_ant_count() -> usize { 8 }
fn default_impatience() -> i64 { 10 }
fn default_disguise_ms() -> u64 { 200 }
