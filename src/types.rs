//! Core data types for welltrace

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Horizontal displacement reported directly by the survey instrument
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalOffset {
    /// Easting delta in metres
    pub dx: f64,
    /// Northing delta in metres
    pub dy: f64,
}

impl HorizontalOffset {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// A single directional-survey record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyStation {
    /// Measured depth along the hole
    pub md: f64,
    /// Inclination in degrees, 0 = vertical
    pub inclination: f64,
    /// Azimuth in degrees clockwise from north
    pub azimuth: f64,
    /// Per-interval Dx/Dy, only consulted in DxDy mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<HorizontalOffset>,
    /// Per-interval TVD delta from a depth column; replaces the
    /// inclination-derived vertical term in DxDy mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<f64>,
}

impl SurveyStation {
    /// Creates an angle-only station
    pub fn new(md: f64, inclination: f64, azimuth: f64) -> Self {
        Self {
            md,
            inclination,
            azimuth,
            offset: None,
            vertical: None,
        }
    }

    /// Attaches a Dx/Dy offset to the station
    pub fn with_offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset = Some(HorizontalOffset::new(dx, dy));
        self
    }

    /// Attaches a measured TVD delta for the interval ending here
    pub fn with_vertical(mut self, dz: f64) -> Self {
        self.vertical = Some(dz);
        self
    }
}

/// Cumulative position of a trajectory point
///
/// `z` is true vertical depth and grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the position shifted by a displacement
    pub fn offset_by(&self, d: Displacement) -> Self {
        Self {
            x: self.x + d.east,
            y: self.y + d.north,
            z: self.z + d.vertical,
        }
    }
}

/// Displacement contributed by one survey interval
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Displacement {
    pub north: f64,
    pub east: f64,
    pub vertical: f64,
}

impl Displacement {
    pub fn new(north: f64, east: f64, vertical: f64) -> Self {
        Self {
            north,
            east,
            vertical,
        }
    }

    /// Plan-view length of the displacement
    pub fn horizontal(&self) -> f64 {
        self.north.hypot(self.east)
    }
}

/// A computed trajectory point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub md: f64,
    pub inclination: f64,
    pub azimuth: f64,
    pub position: Position,
    /// True for the surface point prepended when the survey starts below md 0
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

impl Point {
    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// True vertical depth
    pub fn tvd(&self) -> f64 {
        self.position.z
    }
}

/// How horizontal displacement is obtained for each interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Derived from inclination and azimuth
    #[default]
    Angle,
    /// Taken from the instrument's Dx/Dy values
    DxDy,
}

impl CalculationMode {
    pub fn name(&self) -> &'static str {
        match self {
            CalculationMode::Angle => "angle",
            CalculationMode::DxDy => "dxdy",
        }
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalculationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "angle" | "md" => Ok(CalculationMode::Angle),
            "dxdy" | "xy" | "xyz" => Ok(CalculationMode::DxDy),
            other => Err(format!("unknown calculation mode '{}'", other)),
        }
    }
}

/// Directional-survey interval method used in angle mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyMethod {
    #[default]
    MinimumCurvature,
    AverageAngle,
    BalancedTangential,
}

impl SurveyMethod {
    pub fn name(&self) -> &'static str {
        match self {
            SurveyMethod::MinimumCurvature => "minimum_curvature",
            SurveyMethod::AverageAngle => "average_angle",
            SurveyMethod::BalancedTangential => "balanced_tangential",
        }
    }
}

impl fmt::Display for SurveyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SurveyMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "minimum_curvature" | "mincurv" => Ok(SurveyMethod::MinimumCurvature),
            "average_angle" => Ok(SurveyMethod::AverageAngle),
            "balanced_tangential" => Ok(SurveyMethod::BalancedTangential),
            other => Err(format!("unknown survey method '{}'", other)),
        }
    }
}
