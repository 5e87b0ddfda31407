use std::path::PathBuf;

use thiserror::Error;

/// Inputs that drive the sampling model into an undefined region.
///
/// Returned instead of letting the power law produce NaN or infinity, so a
/// front end can tell a refused calculation apart from a real result.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// Zero error is a singularity of `a * error^b` with `b < 0`.
    #[error("error must be greater than 0%, got {0}%")]
    NonPositiveError(f64),

    /// Zero cores would need an infinite error; negative cores are meaningless.
    #[error("number of soil cores must be greater than 0, got {0}")]
    NonPositiveCores(f64),

    #[error("scale factor a({cv}) = {scale} is not positive")]
    NonPositiveScale { cv: f64, scale: f64 },

    #[error("result overflowed for error {error_percent}% and {cores} cores")]
    Overflow { error_percent: f64, cores: f64 },
}

/// Failures while loading input ranges from a TOML file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse input ranges: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid range for {name}: {reason}")]
    InvalidRange { name: &'static str, reason: String },
}
