//! Display helpers for calculation results and the log scatter plot.

use crate::session::{CalculationMode, CalculationRecord};

pub const X_AXIS_LABEL: &str = "Error (%)";
pub const Y_AXIS_LABEL: &str = "Number of Soil Cores";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Circle, // Cores calculated from error
    Cross,  // Error calculated from cores
}

impl Marker {
    pub fn symbol(&self) -> char {
        match self {
            Marker::Circle => 'o',
            Marker::Cross => 'x',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlotPoint {
    pub x: f64, // Error [%]
    pub y: f64, // Soil cores, rounded to a whole core
    pub label: String,
    pub marker: Marker,
}

/// Result line shown after a calculation: cores with 0 decimals, error with 2.
pub fn format_result(record: &CalculationRecord) -> String {
    match record.mode {
        CalculationMode::CoresFromError => {
            format!("Calculated Number of Soil Cores: {:.0}", record.result_value)
        }
        CalculationMode::ErrorFromCores => {
            format!("Calculated Error: {:.2}%", record.error_percent)
        }
    }
}

pub fn plot_point(record: &CalculationRecord) -> PlotPoint {
    let y = record.result_value.round();
    let (error, marker) = match record.mode {
        CalculationMode::CoresFromError => (record.error_percent.to_string(), Marker::Circle),
        CalculationMode::ErrorFromCores => (format!("{:.2}", record.error_percent), Marker::Cross),
    };
    PlotPoint {
        x: record.error_percent,
        y,
        label: format!("Error: {error}%, CV: {}%, N: {y}", record.cv),
        marker,
    }
}

/// One scatter point per log record, in log order.
pub fn plot_points(log: &[CalculationRecord]) -> Vec<PlotPoint> {
    log.iter().map(plot_point).collect()
}
