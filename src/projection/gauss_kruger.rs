//! Gauss–Krüger zone arithmetic on the Pulkovo 1942 datum
//!
//! Survey azimuths are referenced to true north while Gauss–Krüger grid
//! north differs by the meridian convergence, which grows with the
//! distance from the zone's central meridian.

use crate::error::{Error, Result};

/// Pulkovo 1942 geographic CRS
pub const PULKOVO_1942: u16 = 4284;

/// EPSG code of zone N is `GK_EPSG_BASE + N`
pub const GK_EPSG_BASE: u16 = 28400;

/// Zones with a published Pulkovo 1942 Gauss–Krüger EPSG code
const EPSG_ZONES: std::ops::RangeInclusive<u8> = 2..=32;

/// A six-degree Gauss–Krüger zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaussKrugerZone {
    number: u8,
}

impl GaussKrugerZone {
    pub fn new(number: u8) -> Result<Self> {
        if !(1..=60).contains(&number) {
            return Err(Error::Projection(format!("Invalid Gauss-Krüger zone: {}", number)));
        }
        Ok(Self { number })
    }

    /// Zone containing a longitude given in degrees east
    pub fn from_longitude(lon: f64) -> Result<Self> {
        if !lon.is_finite() {
            return Err(Error::Projection(format!("Invalid longitude: {}", lon)));
        }
        let number = ((lon + 6.0) / 6.0).floor();
        if !(1.0..=60.0).contains(&number) {
            return Err(Error::Projection(format!(
                "Longitude {} lies outside Gauss-Krüger zones 1-60",
                lon
            )));
        }
        Self::new(number as u8)
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// Central meridian of the zone in degrees
    pub fn central_meridian(&self) -> f64 {
        6.0 * f64::from(self.number) - 3.0
    }

    /// Pulkovo 1942 EPSG code for the zone, where one is published
    pub fn epsg(&self) -> Option<u16> {
        EPSG_ZONES
            .contains(&self.number)
            .then(|| GK_EPSG_BASE + u16::from(self.number))
    }

    /// Meridian convergence in degrees at a geographic location
    pub fn convergence(&self, lon: f64, lat: f64) -> f64 {
        meridian_convergence(lon, lat, self.central_meridian())
    }
}

/// Approximate grid convergence `(λ − λ0)·sin φ`, all in degrees
pub fn meridian_convergence(lon: f64, lat: f64, central_meridian: f64) -> f64 {
    (lon - central_meridian) * lat.to_radians().sin()
}
