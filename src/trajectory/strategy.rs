//! Per-interval displacement strategies
//!
//! Angle and DxDy computation are two implementations of one interface;
//! the calculator picks one per run.

use super::methods::IntervalAttitude;
use crate::types::{Displacement, SurveyMethod, SurveyStation};

/// Computes the displacement between two consecutive stations
pub trait IntervalStrategy {
    fn displacement(&self, from: &SurveyStation, to: &SurveyStation) -> Displacement;
}

/// Displacement derived from inclination and azimuth
#[derive(Debug, Clone, Copy)]
pub struct AngleStrategy {
    method: SurveyMethod,
    /// Added to every azimuth before use (declination minus convergence)
    azimuth_correction: f64,
}

impl AngleStrategy {
    pub fn new(method: SurveyMethod, azimuth_correction: f64) -> Self {
        Self {
            method,
            azimuth_correction,
        }
    }
}

impl IntervalStrategy for AngleStrategy {
    fn displacement(&self, from: &SurveyStation, to: &SurveyStation) -> Displacement {
        let attitude = IntervalAttitude::new(
            from.inclination,
            from.azimuth + self.azimuth_correction,
            to.inclination,
            to.azimuth + self.azimuth_correction,
        );
        self.method.displacement(to.md - from.md, &attitude)
    }
}

/// Horizontal displacement from instrument Dx/Dy
///
/// The vertical term is the station's measured TVD delta when present,
/// otherwise the method's in-plane term from the two inclinations.
#[derive(Debug, Clone, Copy)]
pub struct DxDyStrategy {
    method: SurveyMethod,
    /// Rotation applied to each offset, radians counter-clockwise
    rotation: f64,
}

impl DxDyStrategy {
    /// `rotation_deg` is the grid rotation (meridian convergence) in degrees
    pub fn new(method: SurveyMethod, rotation_deg: f64) -> Self {
        Self {
            method,
            rotation: rotation_deg.to_radians(),
        }
    }
}

impl IntervalStrategy for DxDyStrategy {
    fn displacement(&self, from: &SurveyStation, to: &SurveyStation) -> Displacement {
        let vertical = match to.vertical {
            Some(dz) => dz,
            None => self
                .method
                .vertical(to.md - from.md, from.inclination, to.inclination),
        };

        let (dx, dy) = match to.offset {
            Some(offset) => (offset.dx, offset.dy),
            None => (0.0, 0.0),
        };
        if self.rotation == 0.0 {
            return Displacement::new(dy, dx, vertical);
        }

        let (sin, cos) = self.rotation.sin_cos();
        let east = dx * cos - dy * sin;
        let north = dx * sin + dy * cos;
        Displacement::new(north, east, vertical)
    }
}
