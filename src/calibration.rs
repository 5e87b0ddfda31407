use nalgebra::Vector3;

/// Exponent relating error to the required number of cores, `n = a * error^b`.
pub const POWER_EXPONENT: f64 = -1.98;

// Quadratic calibration of the power-law multiplier against CV (Gilbert 1987)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationPolynomial {
    c2: f64, // Coefficient of CV² [-]
    c1: f64, // Coefficient of CV [-]
    c0: f64, // Intercept [-]
}

impl CalibrationPolynomial {
    /// Fertcare Sampling Guide 2019 calibration.
    pub const FERTCARE_2019: Self = Self {
        c2: 4.80,
        c1: -86.97,
        c0: 1782.71,
    };

    pub const fn new(c2: f64, c1: f64, c0: f64) -> Self {
        CalibrationPolynomial { c2, c1, c0 }
    }

    pub fn coefficients(&self) -> Vector3<f64> {
        Vector3::new(self.c2, self.c1, self.c0)
    }

    // Scale factor a(CV) = c2*CV² + c1*CV + c0, total over the reals
    pub fn scale_factor(&self, cv: f64) -> f64 {
        let basis = Vector3::new(cv * cv, cv, 1.0);
        self.coefficients().dot(&basis)
    }
}

impl Default for CalibrationPolynomial {
    fn default() -> Self {
        Self::FERTCARE_2019
    }
}

/// Scale factor `a(cv)` of the default calibration.
pub fn scale_factor(cv: f64) -> f64 {
    CalibrationPolynomial::FERTCARE_2019.scale_factor(cv)
}
