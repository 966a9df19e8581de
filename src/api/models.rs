use serde::Serialize;

use crate::types::{CalculationMode, Point, SurveyMethod};

#[derive(Debug, Serialize)]
pub struct TrajectoryResponse {
    pub well: String,
    pub mode: CalculationMode,
    pub method: SurveyMethod,
    pub epsg: Option<u16>,
    pub meridian_convergence: f64,
    pub horizontal_displacement: f64,
    pub points: Vec<Point>,
    pub report: String,
    pub geojson: serde_json::Value,
    pub execution_time_ms: f64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
