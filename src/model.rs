/*!
Sampling model relating CV, allowed error and the number of soil cores.

The required number of cores follows a power law in the allowed error whose
multiplier depends on the coefficient of variation (CV) of the soil property:

```text
n = a(CV) * error^b
```

with `a(CV)` the calibration polynomial and `b` the power exponent. Both
directions of the calculation evaluate `a(CV)` through the same polynomial.
Inputs that would make the power law undefined are refused with a
`DomainError` instead of producing NaN or infinity.
*/
use crate::calibration::{CalibrationPolynomial, POWER_EXPONENT};
use crate::error::DomainError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingModel {
    calibration: CalibrationPolynomial,
    exponent: f64,
}

impl SamplingModel {
    pub const fn new(calibration: CalibrationPolynomial, exponent: f64) -> Self {
        SamplingModel {
            calibration,
            exponent,
        }
    }

    pub fn scale_factor(&self, cv: f64) -> f64 {
        self.calibration.scale_factor(cv)
    }

    /**
    Number of soil cores needed to reach `error_percent` for a property with the given CV.

    # Arguments
    * `error_percent` - Allowed sampling error [%], must be greater than 0.
    * `cv` - Coefficient of variation [%].

    # Returns
    The core count as f64, floored at 0. Not rounded; see `report` for display.
    */
    pub fn cores_from_error(&self, error_percent: f64, cv: f64) -> Result<f64, DomainError> {
        finite("error", error_percent)?;
        finite("cv", cv)?;
        if error_percent <= 0.0 {
            return Err(DomainError::NonPositiveError(error_percent));
        }

        let a = self.scale_factor(cv);
        // Checked before the clamp: f64::max would turn NaN into 0
        let raw = a * error_percent.powf(self.exponent);
        if !raw.is_finite() {
            return Err(DomainError::Overflow {
                error_percent,
                cores: raw,
            });
        }
        let cores = raw.max(0.0);

        tracing::debug!(error_percent, cv, a, cores, "cores from error");
        Ok(cores)
    }

    /**
    Sampling error achieved with `cores` soil cores, the inverse of `cores_from_error`.

    # Arguments
    * `cores` - Number of soil cores, must be greater than 0.
    * `cv` - Coefficient of variation [%].

    # Returns
    The error in percent.
    */
    pub fn error_from_cores(&self, cores: f64, cv: f64) -> Result<f64, DomainError> {
        finite("cores", cores)?;
        finite("cv", cv)?;
        if cores <= 0.0 {
            return Err(DomainError::NonPositiveCores(cores));
        }

        let a = self.scale_factor(cv);
        if a <= 0.0 {
            return Err(DomainError::NonPositiveScale { cv, scale: a });
        }

        let error_percent = (cores / a).powf(1.0 / self.exponent);
        if !error_percent.is_finite() {
            return Err(DomainError::Overflow {
                error_percent,
                cores,
            });
        }

        tracing::debug!(cores, cv, a, error_percent, "error from cores");
        Ok(error_percent)
    }
}

impl Default for SamplingModel {
    fn default() -> Self {
        Self::new(CalibrationPolynomial::FERTCARE_2019, POWER_EXPONENT)
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFinite { name, value })
    }
}

/// Cores needed for `error_percent` at `cv` with the default calibration.
pub fn cores_from_error(error_percent: f64, cv: f64) -> Result<f64, DomainError> {
    SamplingModel::default().cores_from_error(error_percent, cv)
}

/// Error achieved by `cores` at `cv` with the default calibration.
pub fn error_from_cores(cores: f64, cv: f64) -> Result<f64, DomainError> {
    SamplingModel::default().error_from_cores(cores, cv)
}
