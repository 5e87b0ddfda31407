use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model::SamplingModel;

// Which quantity a calculation solved for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationMode {
    CoresFromError,
    ErrorFromCores,
}

/// A calculation requested by the user, before it is run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Calculation {
    CoresFromError { error_percent: f64, cv: f64 },
    ErrorFromCores { cores: f64, cv: f64 },
}

impl Calculation {
    pub fn mode(&self) -> CalculationMode {
        match self {
            Calculation::CoresFromError { .. } => CalculationMode::CoresFromError,
            Calculation::ErrorFromCores { .. } => CalculationMode::ErrorFromCores,
        }
    }

    pub fn cv(&self) -> f64 {
        match *self {
            Calculation::CoresFromError { cv, .. } | Calculation::ErrorFromCores { cv, .. } => cv,
        }
    }
}

// One entry of the session log
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub mode: CalculationMode,
    pub error_percent: f64, // Input error, or computed error for ErrorFromCores [%]
    pub cv: f64,            // Coefficient of variation [%]
    pub result_value: f64,  // Computed cores, or supplied cores for ErrorFromCores
}

// Layout of an exported log: one `[[records]]` table per calculation
#[derive(Debug, Serialize, Deserialize)]
struct LogExport {
    records: Vec<CalculationRecord>,
}

/// Calculation log of one interactive session.
///
/// Each front-end connection creates its own `Session`; records are appended
/// in the order calculations succeed and are only removed by `clear_log`.
#[derive(Clone, Debug, Default)]
pub struct Session {
    model: SamplingModel,
    log: Vec<CalculationRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: SamplingModel) -> Self {
        Session {
            model,
            log: Vec::new(),
        }
    }

    /// Run `calculation` and append its record to the log.
    ///
    /// On a `DomainError` the log is left untouched.
    pub fn submit_calculation(
        &mut self,
        calculation: Calculation,
    ) -> Result<CalculationRecord, DomainError> {
        let record = match calculation {
            Calculation::CoresFromError { error_percent, cv } => CalculationRecord {
                mode: CalculationMode::CoresFromError,
                error_percent,
                cv,
                result_value: self.model.cores_from_error(error_percent, cv)?,
            },
            Calculation::ErrorFromCores { cores, cv } => CalculationRecord {
                mode: CalculationMode::ErrorFromCores,
                error_percent: self.model.error_from_cores(cores, cv)?,
                cv,
                result_value: cores,
            },
        };
        self.log.push(record);
        tracing::debug!(entries = self.log.len(), ?record, "calculation logged");
        Ok(record)
    }

    pub fn cores_from_error(&mut self, error_percent: f64, cv: f64) -> Result<f64, DomainError> {
        self.submit_calculation(Calculation::CoresFromError { error_percent, cv })
            .map(|r| r.result_value)
    }

    pub fn error_from_cores(&mut self, cores: f64, cv: f64) -> Result<f64, DomainError> {
        self.submit_calculation(Calculation::ErrorFromCores { cores, cv })
            .map(|r| r.error_percent)
    }

    pub fn clear_log(&mut self) {
        tracing::debug!(entries = self.log.len(), "clearing calculation log");
        self.log.clear();
    }

    // Owned copy, independent of later appends
    pub fn get_log(&self) -> Vec<CalculationRecord> {
        self.log.clone()
    }

    pub fn log(&self) -> &[CalculationRecord] {
        &self.log
    }

    /// The log as TOML, for display or saving by a front end.
    pub fn export_log(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&LogExport {
            records: self.get_log(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{CalibrationPolynomial, POWER_EXPONENT};
    use approx::assert_relative_eq;

    #[test]
    fn forward_calculation_is_logged() {
        let mut session = Session::new();
        let record = session
            .submit_calculation(Calculation::CoresFromError {
                error_percent: 10.0,
                cv: 30.0,
            })
            .unwrap();
        assert_eq!(record.mode, CalculationMode::CoresFromError);
        assert_eq!(record.error_percent, 10.0);
        assert_eq!(record.cv, 30.0);
        assert_relative_eq!(record.result_value, 36.58, epsilon = 0.01);
        assert_eq!(session.get_log(), vec![record]);
    }

    #[test]
    fn inverse_calculation_logs_supplied_cores() {
        let mut session = Session::new();
        let error = session.error_from_cores(20.0, 30.0).unwrap();
        let log = session.get_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].mode, CalculationMode::ErrorFromCores);
        assert_eq!(log[0].result_value, 20.0);
        assert_eq!(log[0].error_percent, error);
        assert_relative_eq!(error, 13.5658, epsilon = 1e-3);
    }

    #[test]
    fn log_keeps_submission_order() {
        let mut session = Session::new();
        session.cores_from_error(10.0, 30.0).unwrap();
        session.error_from_cores(50.0, 40.0).unwrap();
        session.cores_from_error(25.0, 12.0).unwrap();

        let log = session.get_log();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].cv, 30.0);
        assert_eq!(log[1].mode, CalculationMode::ErrorFromCores);
        assert_eq!(log[1].result_value, 50.0);
        assert_eq!(log[2].error_percent, 25.0);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut session = Session::new();
        session.clear_log();
        assert!(session.get_log().is_empty());

        for error in 5..15 {
            session.cores_from_error(error as f64, 30.0).unwrap();
        }
        session.clear_log();
        assert!(session.get_log().is_empty());

        session.cores_from_error(10.0, 30.0).unwrap();
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn failed_calculation_is_not_logged() {
        let mut session = Session::new();
        session.cores_from_error(10.0, 30.0).unwrap();

        assert_eq!(
            session.cores_from_error(0.0, 30.0),
            Err(DomainError::NonPositiveError(0.0))
        );
        assert_eq!(
            session.error_from_cores(0.0, 30.0),
            Err(DomainError::NonPositiveCores(0.0))
        );
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn snapshot_is_independent_of_later_appends() {
        let mut session = Session::new();
        session.cores_from_error(10.0, 30.0).unwrap();
        let snapshot = session.get_log();
        session.cores_from_error(20.0, 30.0).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn sessions_do_not_share_logs() {
        let mut first = Session::new();
        let mut second = Session::new();
        first.cores_from_error(10.0, 30.0).unwrap();
        second.error_from_cores(20.0, 30.0).unwrap();
        second.error_from_cores(30.0, 30.0).unwrap();
        first.clear_log();

        assert!(first.log().is_empty());
        assert_eq!(second.log().len(), 2);
    }

    #[test]
    fn exported_log_reads_back() {
        let mut session = Session::new();
        session.cores_from_error(10.0, 30.0).unwrap();
        session.error_from_cores(20.0, 30.0).unwrap();

        let exported = session.export_log().unwrap();
        assert!(exported.contains("mode = \"ErrorFromCores\""));
        let parsed: LogExport = toml::from_str(&exported).unwrap();
        assert_eq!(parsed.records, session.get_log());

        session.clear_log();
        let parsed: LogExport = toml::from_str(&session.export_log().unwrap()).unwrap();
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn custom_model_drives_the_session() {
        let model = SamplingModel::new(CalibrationPolynomial::new(1.0, 0.0, -100.0), POWER_EXPONENT);
        let mut session = Session::with_model(model);

        assert!(matches!(
            session.error_from_cores(20.0, 5.0),
            Err(DomainError::NonPositiveScale { .. })
        ));
        assert_eq!(session.cores_from_error(10.0, 5.0), Ok(0.0));
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn calculation_reports_mode_and_cv() {
        let calc = Calculation::ErrorFromCores {
            cores: 20.0,
            cv: 45.0,
        };
        assert_eq!(calc.mode(), CalculationMode::ErrorFromCores);
        assert_eq!(calc.cv(), 45.0);
    }
}
