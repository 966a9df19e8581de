//! Validated directional-survey sequences
//!
//! A [`Survey`] can only be built from stations that pass every check the
//! trajectory pass relies on, so computation never sees malformed input.

use crate::error::{Error, Result, ValidationError};
use crate::types::{CalculationMode, SurveyStation};

/// Ordered, validated survey stations for one well
#[derive(Debug, Clone, PartialEq)]
pub struct Survey {
    stations: Vec<SurveyStation>,
    mode: CalculationMode,
}

impl Survey {
    /// Validates `stations` for `mode` and wraps them
    ///
    /// Fails with [`Error::EmptySurvey`] when there are no stations and with
    /// [`Error::Validation`] on the first offending station.
    pub fn new(stations: Vec<SurveyStation>, mode: CalculationMode) -> Result<Self> {
        if stations.is_empty() {
            return Err(Error::EmptySurvey);
        }
        validate(&stations, mode)?;
        Ok(Self { stations, mode })
    }

    pub fn stations(&self) -> &[SurveyStation] {
        &self.stations
    }

    pub fn mode(&self) -> CalculationMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn first(&self) -> &SurveyStation {
        &self.stations[0]
    }
}

/// Checks a station sequence without taking ownership
pub fn validate(stations: &[SurveyStation], mode: CalculationMode) -> Result<()> {
    let mut previous: Option<f64> = None;

    for (index, station) in stations.iter().enumerate() {
        check_finite(index, "md", station.md)?;
        check_finite(index, "inclination", station.inclination)?;
        check_finite(index, "azimuth", station.azimuth)?;

        if station.md < 0.0 {
            return Err(ValidationError::NegativeDepth {
                index,
                depth: station.md,
            }
            .into());
        }
        if let Some(prev) = previous {
            if station.md <= prev {
                return Err(ValidationError::NonIncreasingDepth {
                    index,
                    previous: prev,
                    depth: station.md,
                }
                .into());
            }
        }
        if !(0.0..=180.0).contains(&station.inclination) {
            return Err(ValidationError::InclinationOutOfRange {
                index,
                value: station.inclination,
            }
            .into());
        }
        if !(0.0..=360.0).contains(&station.azimuth) {
            return Err(ValidationError::AzimuthOutOfRange {
                index,
                value: station.azimuth,
            }
            .into());
        }

        match (mode, station.offset) {
            (CalculationMode::DxDy, Some(offset)) => {
                check_finite(index, "dx", offset.dx)?;
                check_finite(index, "dy", offset.dy)?;
                if let Some(dz) = station.vertical {
                    check_finite(index, "vertical", dz)?;
                }
            }
            // the origin station has no interval before it
            (CalculationMode::DxDy, None) if index > 0 => {
                return Err(ValidationError::MissingOffset { index }.into());
            }
            _ => {}
        }

        previous = Some(station.md);
    }

    Ok(())
}

fn check_finite(index: usize, field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { index, field }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle_stations() -> Vec<SurveyStation> {
        vec![
            SurveyStation::new(0.0, 0.0, 0.0),
            SurveyStation::new(100.0, 5.0, 45.0),
            SurveyStation::new(200.0, 10.0, 50.0),
        ]
    }

    fn validation_error(result: Result<Survey>) -> ValidationError {
        match result {
            Err(Error::Validation(e)) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_survey() {
        let survey = Survey::new(angle_stations(), CalculationMode::Angle).unwrap();
        assert_eq!(survey.len(), 3);
        assert_eq!(survey.mode(), CalculationMode::Angle);
        assert_eq!(survey.first().md, 0.0);
    }

    #[test]
    fn test_empty_survey() {
        let result = Survey::new(Vec::new(), CalculationMode::Angle);
        assert!(matches!(result, Err(Error::EmptySurvey)));
    }

    #[test]
    fn test_single_station_is_valid() {
        let survey = Survey::new(vec![SurveyStation::new(0.0, 0.0, 0.0)], CalculationMode::DxDy);
        assert!(survey.is_ok());
    }

    #[test]
    fn test_non_increasing_depth() {
        let mut stations = angle_stations();
        stations[2].md = 100.0;
        let err = validation_error(Survey::new(stations, CalculationMode::Angle));
        assert_eq!(
            err,
            ValidationError::NonIncreasingDepth {
                index: 2,
                previous: 100.0,
                depth: 100.0
            }
        );
    }

    #[test]
    fn test_decreasing_depth() {
        let mut stations = angle_stations();
        stations[1].md = 250.0;
        let err = validation_error(Survey::new(stations, CalculationMode::Angle));
        assert_eq!(err.index(), 2);
    }

    #[test]
    fn test_negative_depth() {
        let stations = vec![SurveyStation::new(-5.0, 0.0, 0.0)];
        let err = validation_error(Survey::new(stations, CalculationMode::Angle));
        assert!(matches!(err, ValidationError::NegativeDepth { index: 0, .. }));
    }

    #[test]
    fn test_inclination_out_of_range() {
        let mut stations = angle_stations();
        stations[1].inclination = 181.0;
        let err = validation_error(Survey::new(stations, CalculationMode::Angle));
        assert!(matches!(err, ValidationError::InclinationOutOfRange { index: 1, .. }));
    }

    #[test]
    fn test_azimuth_out_of_range() {
        let mut stations = angle_stations();
        stations[2].azimuth = -1.0;
        let err = validation_error(Survey::new(stations, CalculationMode::Angle));
        assert!(matches!(err, ValidationError::AzimuthOutOfRange { index: 2, .. }));
    }

    #[test]
    fn test_azimuth_360_accepted() {
        let mut stations = angle_stations();
        stations[2].azimuth = 360.0;
        assert!(Survey::new(stations, CalculationMode::Angle).is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        let mut stations = angle_stations();
        stations[1].inclination = f64::NAN;
        let err = validation_error(Survey::new(stations, CalculationMode::Angle));
        assert_eq!(
            err,
            ValidationError::NonFinite {
                index: 1,
                field: "inclination"
            }
        );
    }

    #[test]
    fn test_dxdy_requires_offsets() {
        let stations = vec![
            SurveyStation::new(0.0, 0.0, 0.0),
            SurveyStation::new(100.0, 5.0, 0.0).with_offset(1.0, 2.0),
            SurveyStation::new(200.0, 5.0, 0.0),
        ];
        let err = validation_error(Survey::new(stations.clone(), CalculationMode::DxDy));
        assert_eq!(err, ValidationError::MissingOffset { index: 2 });

        // angle mode ignores offsets entirely
        assert!(Survey::new(stations, CalculationMode::Angle).is_ok());
    }

    #[test]
    fn test_dxdy_origin_needs_no_offset() {
        let stations = vec![
            SurveyStation::new(0.0, 0.0, 0.0),
            SurveyStation::new(100.0, 5.0, 0.0).with_offset(1.0, 2.0),
        ];
        assert!(Survey::new(stations, CalculationMode::DxDy).is_ok());
    }
}
