use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Parameters shared by both estimators.
///
/// Every field has a default, so a TOML file only needs the keys it overrides:
///
/// ```toml
/// damping = 0.9
/// samples = 100000
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Probability of following an outbound link instead of teleporting.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Length of the random walk.
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Iteration stops once no page moves by this much or more.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub max_iterations: Option<usize>,
    /// Seed for the random walk. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            samples: default_samples(),
            tolerance: default_tolerance(),
            max_iterations: None,
            seed: None,
        }
    }
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_samples() -> usize {
    10000
}

const fn default_tolerance() -> f64 {
    0.001
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Reports the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        check_samples(self.samples)?;
        check_tolerance(self.tolerance)?;
        if let Some(cap) = self.max_iterations {
            if cap == 0 {
                return Err(Error::InvalidParameter {
                    name: "max_iterations",
                    value: 0.0,
                    reason: "must be at least 1",
                });
            }
        }
        Ok(())
    }
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "damping",
            value: damping,
            reason: "must be within [0, 1]",
        })
    }
}

pub(crate) fn check_samples(samples: usize) -> Result<()> {
    if samples >= 1 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "samples",
            value: samples as f64,
            reason: "must be at least 1",
        })
    }
}

pub(crate) fn check_tolerance(tolerance: f64) -> Result<()> {
    // `!(x > 0.0)` also rejects NaN.
    if !(tolerance > 0.0) {
        return Err(Error::InvalidParameter {
            name: "tolerance",
            value: tolerance,
            reason: "must be positive",
        });
    }
    Ok(())
}
