//! Suggested input ranges of the calculator, optionally read from TOML.
//!
//! The calibration was fitted over these ranges only. Inputs outside them are
//! still calculated but raise a [`RangeAdvisory`].

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::session::Calculation;

/// Default location of the input ranges file.
pub const DEFAULT_RANGES_FILE: &str = "sampling_ranges.toml";

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64, default: f64, step: f64) -> Self {
        InputRange {
            min,
            max,
            default,
            step,
        }
    }

    // CV [%]
    fn cv() -> Self {
        Self::new(3.0, 90.0, 30.0, 1.0)
    }

    // Error [%]
    fn error() -> Self {
        Self::new(5.0, 50.0, 10.0, 1.0)
    }

    // Soil cores [-]
    fn cores() -> Self {
        Self::new(0.0, 1000.0, 20.0, 1.0)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        let reason = if self.min > self.max {
            format!("min {} is greater than max {}", self.min, self.max)
        } else if !self.contains(self.default) {
            format!(
                "default {} is outside [{}, {}]",
                self.default, self.min, self.max
            )
        } else if self.step <= 0.0 {
            format!("step {} must be positive", self.step)
        } else {
            return Ok(());
        };
        Err(ConfigError::InvalidRange { name, reason })
    }
}

/// Non-fatal warning for an input outside its suggested range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeAdvisory {
    pub input: &'static str,
    pub value: f64,
    pub range: InputRange,
}

impl fmt::Display for RangeAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} is outside the calibrated range [{}, {}]; the result is unverified",
            self.input, self.value, self.range.min, self.range.max
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct InputRanges {
    #[serde(default = "InputRange::cv")]
    pub cv: InputRange,
    #[serde(default = "InputRange::error")]
    pub error: InputRange,
    #[serde(default = "InputRange::cores")]
    pub cores: InputRange,
}

impl Default for InputRanges {
    fn default() -> Self {
        InputRanges {
            cv: InputRange::cv(),
            error: InputRange::error(),
            cores: InputRange::cores(),
        }
    }
}

impl InputRanges {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let ranges: InputRanges = toml::from_str(toml_str)?;
        ranges.cv.validate("cv")?;
        ranges.error.validate("error")?;
        ranges.cores.validate("cores")?;
        Ok(ranges)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let toml_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ranges = Self::from_toml_str(&toml_str)?;
        tracing::debug!(path = %path.display(), "loaded input ranges");
        Ok(ranges)
    }

    /// Every input of `calculation` lying outside its suggested range.
    pub fn check(&self, calculation: &Calculation) -> Vec<RangeAdvisory> {
        let inputs = match *calculation {
            Calculation::CoresFromError { error_percent, cv } => {
                [("error", error_percent, self.error), ("cv", cv, self.cv)]
            }
            Calculation::ErrorFromCores { cores, cv } => {
                [("cores", cores, self.cores), ("cv", cv, self.cv)]
            }
        };

        let advisories: Vec<RangeAdvisory> = inputs
            .into_iter()
            .filter(|(_, value, range)| !range.contains(*value))
            .map(|(input, value, range)| RangeAdvisory {
                input,
                value,
                range,
            })
            .collect();
        for advisory in &advisories {
            tracing::warn!("{advisory}");
        }
        advisories
    }
}
