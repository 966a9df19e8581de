use serde::{Deserialize, Serialize};

/// Plan-view coordinate in the map's reference system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a coordinate from longitude/latitude in degrees
    pub fn from_lonlat(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat)
    }

    /// `[x, y]` pair as used by GeoJSON positions
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}
