//! Interval formulas for directional surveys
//!
//! All angles enter in degrees. Every formula returns the displacement of
//! one interval in a north/east/down frame.

use crate::types::{Displacement, SurveyMethod};

/// Inclinations below this (degrees) are treated as a vertical hole
pub const VERTICAL_TOLERANCE_DEG: f64 = 1e-6;

/// Doglegs below this (radians) use a ratio factor of exactly one
const DOGLEG_EPSILON: f64 = 1e-9;

/// Wraps an azimuth into [0, 360)
pub fn normalize_azimuth(azimuth: f64) -> f64 {
    let wrapped = azimuth.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed turn from `from` to `to`, in (-180, 180]
pub fn azimuth_difference(from: f64, to: f64) -> f64 {
    let diff = (to - from).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Mid-direction of an interval, taken along the shorter turn
pub fn mean_azimuth(a1: f64, a2: f64) -> f64 {
    normalize_azimuth(a1 + azimuth_difference(a1, a2) / 2.0)
}

pub fn is_vertical(inclination: f64) -> bool {
    inclination.abs() < VERTICAL_TOLERANCE_DEG
}

/// Attitude of both interval ends with immaterial azimuths resolved
///
/// A vertical end carries no direction, so it borrows the azimuth of the
/// other end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalAttitude {
    pub inc1: f64,
    pub az1: f64,
    pub inc2: f64,
    pub az2: f64,
}

impl IntervalAttitude {
    pub fn new(inc1: f64, az1: f64, inc2: f64, az2: f64) -> Self {
        let (az1, az2) = match (is_vertical(inc1), is_vertical(inc2)) {
            (true, false) => (az2, az2),
            (false, true) => (az1, az1),
            _ => (az1, az2),
        };
        Self {
            inc1,
            az1: normalize_azimuth(az1),
            inc2,
            az2: normalize_azimuth(az2),
        }
    }

    pub fn is_vertical(&self) -> bool {
        is_vertical(self.inc1) && is_vertical(self.inc2)
    }

    /// Turn in azimuth, normalised into (-180, 180]
    pub fn turn(&self) -> f64 {
        azimuth_difference(self.az1, self.az2)
    }

    /// Total angle change over the interval, in radians
    pub fn dogleg(&self) -> f64 {
        dogleg(self.inc1, self.inc2, self.turn())
    }
}

/// Dogleg angle in radians
///
/// Haversine form, which keeps precision on nearly straight intervals.
pub fn dogleg(inc1: f64, inc2: f64, turn: f64) -> f64 {
    let i1 = inc1.to_radians();
    let i2 = inc2.to_radians();
    let half_di = ((i2 - i1) / 2.0).sin();
    let half_da = (turn.to_radians() / 2.0).sin();
    let h = half_di * half_di + i1.sin() * i2.sin() * half_da * half_da;
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Minimum-curvature ratio factor for a dogleg in radians
pub fn ratio_factor(dogleg: f64) -> f64 {
    if dogleg < DOGLEG_EPSILON {
        1.0
    } else {
        2.0 / dogleg * (dogleg / 2.0).tan()
    }
}

impl SurveyMethod {
    /// Full 3D displacement over an interval of length `course`
    pub fn displacement(&self, course: f64, attitude: &IntervalAttitude) -> Displacement {
        if attitude.is_vertical() {
            return Displacement::new(0.0, 0.0, course);
        }

        match self {
            SurveyMethod::MinimumCurvature => {
                tangential(course, attitude, ratio_factor(attitude.dogleg()))
            }
            SurveyMethod::BalancedTangential => tangential(course, attitude, 1.0),
            SurveyMethod::AverageAngle => {
                let inc = ((attitude.inc1 + attitude.inc2) / 2.0).to_radians();
                let az = mean_azimuth(attitude.az1, attitude.az2).to_radians();
                Displacement::new(
                    course * inc.sin() * az.cos(),
                    course * inc.sin() * az.sin(),
                    course * inc.cos(),
                )
            }
        }
    }

    /// Vertical component derived from inclinations alone
    ///
    /// Used when horizontal displacement comes from elsewhere. Minimum
    /// curvature treats the interval as an arc in a vertical plane.
    pub fn vertical(&self, course: f64, inc1: f64, inc2: f64) -> f64 {
        let i1 = inc1.to_radians();
        let i2 = inc2.to_radians();
        match self {
            SurveyMethod::MinimumCurvature => {
                let rf = ratio_factor((i2 - i1).abs());
                course / 2.0 * (i1.cos() + i2.cos()) * rf
            }
            SurveyMethod::BalancedTangential => course / 2.0 * (i1.cos() + i2.cos()),
            SurveyMethod::AverageAngle => course * ((i1 + i2) / 2.0).cos(),
        }
    }
}

fn tangential(course: f64, attitude: &IntervalAttitude, rf: f64) -> Displacement {
    let i1 = attitude.inc1.to_radians();
    let i2 = attitude.inc2.to_radians();
    let a1 = attitude.az1.to_radians();
    let a2 = attitude.az2.to_radians();
    let half = course / 2.0 * rf;

    Displacement::new(
        half * (i1.sin() * a1.cos() + i2.sin() * a2.cos()),
        half * (i1.sin() * a1.sin() + i2.sin() * a2.sin()),
        half * (i1.cos() + i2.cos()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_normalize_azimuth() {
        assert_eq!(normalize_azimuth(360.0), 0.0);
        assert_eq!(normalize_azimuth(370.0), 10.0);
        assert_eq!(normalize_azimuth(-10.0), 350.0);
        assert_eq!(normalize_azimuth(45.0), 45.0);
    }

    #[test]
    fn test_azimuth_difference_wraps() {
        assert_eq!(azimuth_difference(350.0, 10.0), 20.0);
        assert_eq!(azimuth_difference(10.0, 350.0), -20.0);
        assert_eq!(azimuth_difference(0.0, 180.0), 180.0);
        assert_eq!(azimuth_difference(180.0, 0.0), 180.0);
        assert_eq!(azimuth_difference(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_mean_azimuth_across_north() {
        assert!(close(mean_azimuth(350.0, 10.0), 0.0) || close(mean_azimuth(350.0, 10.0), 360.0));
        assert!(close(mean_azimuth(340.0, 0.0), 350.0));
        assert!(close(mean_azimuth(20.0, 40.0), 30.0));
    }

    #[test]
    fn test_vertical_end_borrows_azimuth() {
        let attitude = IntervalAttitude::new(0.0, 270.0, 10.0, 45.0);
        assert_eq!(attitude.az1, 45.0);
        assert_eq!(attitude.turn(), 0.0);

        let attitude = IntervalAttitude::new(10.0, 45.0, 0.0, 200.0);
        assert_eq!(attitude.az2, 45.0);
    }

    #[test]
    fn test_dogleg_straight_hole() {
        assert!(dogleg(30.0, 30.0, 0.0) < EPS);
    }

    #[test]
    fn test_dogleg_pure_build() {
        assert!(close(dogleg(10.0, 40.0, 0.0), 30f64.to_radians()));
    }

    #[test]
    fn test_dogleg_turn_at_horizontal() {
        assert!(close(dogleg(90.0, 90.0, 20.0), 20f64.to_radians()));
    }

    #[test]
    fn test_ratio_factor() {
        assert_eq!(ratio_factor(0.0), 1.0);
        assert!(ratio_factor(0.5) > 1.0);
    }

    #[test]
    fn test_vertical_interval_has_no_horizontal() {
        for method in [
            SurveyMethod::MinimumCurvature,
            SurveyMethod::AverageAngle,
            SurveyMethod::BalancedTangential,
        ] {
            let d = method.displacement(100.0, &IntervalAttitude::new(0.0, 10.0, 0.0, 300.0));
            assert_eq!(d, Displacement::new(0.0, 0.0, 100.0));
        }
    }

    #[test]
    fn test_straight_inclined_interval() {
        let attitude = IntervalAttitude::new(30.0, 90.0, 30.0, 90.0);
        for method in [
            SurveyMethod::MinimumCurvature,
            SurveyMethod::AverageAngle,
            SurveyMethod::BalancedTangential,
        ] {
            let d = method.displacement(100.0, &attitude);
            assert!(close(d.east, 50.0), "{}: east {}", method, d.east);
            assert!(d.north.abs() < 1e-6);
            assert!(close(d.vertical, 100.0 * 30f64.to_radians().cos()));
        }
    }

    #[test]
    fn test_minimum_curvature_planar_arc() {
        // build from 0 to 90 degrees over a quarter circle of radius R
        let course = 100.0;
        let radius = course / std::f64::consts::FRAC_PI_2;
        let d = SurveyMethod::MinimumCurvature
            .displacement(course, &IntervalAttitude::new(0.0, 0.0, 90.0, 0.0));
        assert!(close(d.north, radius));
        assert!(close(d.vertical, radius));
        assert!(d.east.abs() < 1e-9);
    }

    #[test]
    fn test_wraparound_turn_is_symmetric() {
        // 350 -> 10 is a 20 degree turn through north
        let attitude = IntervalAttitude::new(30.0, 350.0, 30.0, 10.0);
        assert!(close(attitude.turn(), 20.0));
        for method in [
            SurveyMethod::MinimumCurvature,
            SurveyMethod::AverageAngle,
            SurveyMethod::BalancedTangential,
        ] {
            let d = method.displacement(100.0, &attitude);
            assert!(d.east.abs() < 1e-9, "{}: east {}", method, d.east);
            assert!(d.north > 49.0, "{}: north {}", method, d.north);
        }
    }

    #[test]
    fn test_vertical_component_methods() {
        let course = 100.0;
        let arc = SurveyMethod::MinimumCurvature.vertical(course, 0.0, 30.0);
        let expected = course / 30f64.to_radians() * 30f64.to_radians().sin();
        assert!(close(arc, expected));

        let avg = SurveyMethod::AverageAngle.vertical(course, 0.0, 30.0);
        assert!(close(avg, course * 15f64.to_radians().cos()));

        let bal = SurveyMethod::BalancedTangential.vertical(course, 0.0, 30.0);
        assert!(close(bal, course / 2.0 * (1.0 + 30f64.to_radians().cos())));
    }

    #[test]
    fn test_vertical_matches_full_displacement_in_plane() {
        let attitude = IntervalAttitude::new(12.0, 70.0, 35.0, 70.0);
        for method in [
            SurveyMethod::MinimumCurvature,
            SurveyMethod::AverageAngle,
            SurveyMethod::BalancedTangential,
        ] {
            let full = method.displacement(90.0, &attitude);
            assert!(close(full.vertical, method.vertical(90.0, 12.0, 35.0)));
        }
    }
}
