mod calibration;
mod error;
mod model;
mod report;
mod session;
mod settings;

pub use calibration::{CalibrationPolynomial, POWER_EXPONENT, scale_factor};
pub use error::{ConfigError, DomainError};
pub use model::{SamplingModel, cores_from_error, error_from_cores};
pub use report::{Marker, PlotPoint, X_AXIS_LABEL, Y_AXIS_LABEL, format_result, plot_points};
pub use session::{Calculation, CalculationMode, CalculationRecord, Session};
pub use settings::{DEFAULT_RANGES_FILE, InputRange, InputRanges, RangeAdvisory};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn it_works() {
        let ranges = InputRanges::default();
        let mut session = Session::new();

        let calc = Calculation::CoresFromError {
            error_percent: ranges.error.default,
            cv: ranges.cv.default,
        };
        assert!(ranges.check(&calc).is_empty());
        let record = session.submit_calculation(calc).unwrap();
        assert_eq!(format_result(&record), "Calculated Number of Soil Cores: 37");

        let calc = Calculation::ErrorFromCores {
            cores: ranges.cores.default,
            cv: ranges.cv.default,
        };
        let record = session.submit_calculation(calc).unwrap();
        assert_relative_eq!(record.error_percent, 13.57, epsilon = 0.01);

        assert_eq!(plot_points(session.log()).len(), 2);
        session.clear_log();
        assert!(session.get_log().is_empty());
    }
}
