//! Trajectory computation
//!
//! Turns a validated [`Survey`] into cumulative positions in one forward
//! pass. The interval strategy is chosen once from the calculation mode.
//!
//! ```
//! use welltrace::{Survey, SurveyStation, CalculationMode, TrajectoryCalculator, CalculationSettings};
//!
//! let survey = Survey::new(vec![
//!     SurveyStation::new(0.0, 0.0, 0.0),
//!     SurveyStation::new(100.0, 0.0, 45.0),
//!     SurveyStation::new(200.0, 30.0, 45.0),
//! ], CalculationMode::Angle)?;
//!
//! let trajectory = TrajectoryCalculator::new(CalculationSettings::default()).compute(&survey)?;
//! assert_eq!(trajectory.len(), 3);
//! # Ok::<(), welltrace::Error>(())
//! ```

pub mod methods;
pub mod strategy;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result, ValidationError};
use crate::projection::HorizontalTrace;
use crate::survey::Survey;
use crate::types::{CalculationMode, Point, Position, SurveyMethod, SurveyStation};
use methods::normalize_azimuth;
use strategy::{AngleStrategy, DxDyStrategy, IntervalStrategy};

/// Parameters of one calculation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationSettings {
    pub method: SurveyMethod,
    /// Position of the first point
    pub origin: Position,
    /// Degrees added to magnetic azimuths (angle mode only)
    pub magnetic_declination: f64,
    /// Grid convergence in degrees at the wellhead
    pub meridian_convergence: f64,
    /// Prepend a vertical surface point when the survey starts below md 0
    pub synthesize_surface: bool,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            method: SurveyMethod::default(),
            origin: Position::default(),
            magnetic_declination: 0.0,
            meridian_convergence: 0.0,
            synthesize_surface: true,
        }
    }
}

impl CalculationSettings {
    /// Total correction turning survey azimuths into grid azimuths
    pub fn azimuth_correction(&self) -> f64 {
        self.magnetic_declination - self.meridian_convergence
    }
}

/// Computes trajectories from surveys
#[derive(Debug, Clone, Default)]
pub struct TrajectoryCalculator {
    settings: CalculationSettings,
}

impl TrajectoryCalculator {
    pub fn new(settings: CalculationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CalculationSettings {
        &self.settings
    }

    /// Validates `stations` for `mode` and computes the trajectory
    pub fn compute_stations(
        &self,
        stations: Vec<SurveyStation>,
        mode: CalculationMode,
    ) -> Result<Trajectory> {
        let survey = Survey::new(stations, mode)?;
        self.compute(&survey)
    }

    /// Computes the trajectory of a validated survey
    pub fn compute(&self, survey: &Survey) -> Result<Trajectory> {
        let settings = &self.settings;
        let points = match survey.mode() {
            CalculationMode::Angle => {
                let strategy = AngleStrategy::new(settings.method, settings.azimuth_correction());
                integrate(survey.stations(), &strategy, settings)
            }
            CalculationMode::DxDy => {
                // a synthesized surface point turns station 0 into an interval end
                let first = survey.first();
                if settings.synthesize_surface && first.md > 0.0 && first.offset.is_none() {
                    return Err(ValidationError::MissingOffset { index: 0 }.into());
                }
                let strategy = DxDyStrategy::new(settings.method, settings.meridian_convergence);
                integrate(survey.stations(), &strategy, settings)
            }
        };

        debug!(
            mode = %survey.mode(),
            method = %settings.method,
            stations = survey.len(),
            points = points.len(),
            "trajectory computed"
        );

        Trajectory::from_points(points, survey.mode(), settings.method)
    }
}

/// Forward pass shared by every strategy
fn integrate<S: IntervalStrategy>(
    stations: &[SurveyStation],
    strategy: &S,
    settings: &CalculationSettings,
) -> Vec<Point> {
    let mut points = Vec::with_capacity(stations.len() + 1);
    let first = stations[0];

    if settings.synthesize_surface && first.md > 0.0 {
        let surface = SurveyStation {
            md: 0.0,
            inclination: 0.0,
            azimuth: first.azimuth,
            offset: None,
            vertical: None,
        };
        points.push(Point {
            synthetic: true,
            ..station_point(&surface, settings.origin)
        });
        let position = settings.origin.offset_by(strategy.displacement(&surface, &first));
        points.push(station_point(&first, position));
    } else {
        points.push(station_point(&first, settings.origin));
    }

    let mut previous = first;
    for station in &stations[1..] {
        let last = points[points.len() - 1].position;
        let position = last.offset_by(strategy.displacement(&previous, station));
        points.push(station_point(station, position));
        previous = *station;
    }

    points
}

fn station_point(station: &SurveyStation, position: Position) -> Point {
    Point {
        md: station.md,
        inclination: station.inclination,
        azimuth: normalize_azimuth(station.azimuth),
        position,
        synthetic: false,
    }
}

/// Computed trajectory of one well
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    points: Vec<Point>,
    mode: CalculationMode,
    method: SurveyMethod,
}

impl Trajectory {
    fn from_points(points: Vec<Point>, mode: CalculationMode, method: SurveyMethod) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptySurvey);
        }
        Ok(Self {
            points,
            mode,
            method,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a trajectory holds at least its origin
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &Point {
        &self.points[0]
    }

    pub fn last(&self) -> &Point {
        &self.points[self.points.len() - 1]
    }

    pub fn mode(&self) -> CalculationMode {
        self.mode
    }

    pub fn method(&self) -> SurveyMethod {
        self.method
    }

    /// Plan-view distance between the first and last point
    pub fn horizontal_displacement(&self) -> f64 {
        let first = self.first().position;
        let last = self.last().position;
        (last.x - first.x).hypot(last.y - first.y)
    }

    /// Plan-view projection of the trajectory
    pub fn horizontal_trace(&self) -> HorizontalTrace {
        HorizontalTrace::from_trajectory(self)
    }

    /// Linearly interpolated point at measured depth `md`
    ///
    /// Returns `None` outside the surveyed depth range. An exact station
    /// depth returns that station unchanged.
    pub fn interpolate(&self, md: f64) -> Option<Point> {
        if !md.is_finite() || md < self.first().md || md > self.last().md {
            return None;
        }

        let upper = self.points.partition_point(|p| p.md < md);
        let bottom = self.points[upper];
        if bottom.md == md || upper == 0 {
            return Some(bottom);
        }
        let top = self.points[upper - 1];

        let t = (md - top.md) / (bottom.md - top.md);
        let lerp = |a: f64, b: f64| a + t * (b - a);
        Some(Point {
            md,
            inclination: lerp(top.inclination, bottom.inclination),
            azimuth: methods::normalize_azimuth(
                top.azimuth + t * methods::azimuth_difference(top.azimuth, bottom.azimuth),
            ),
            position: Position::new(
                lerp(top.position.x, bottom.position.x),
                lerp(top.position.y, bottom.position.y),
                lerp(top.position.z, bottom.position.z),
            ),
            synthetic: false,
        })
    }
}
