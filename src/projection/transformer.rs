use crate::error::{Error, Result};
use crate::projection::coordinate::Coordinate;
use crate::projection::gauss_kruger::{GaussKrugerZone, PULKOVO_1942};
use proj::Proj;

/// Transforms coordinates between two EPSG reference systems
pub struct Transformer {
    proj: Proj,
    from_epsg: u16,
    to_epsg: u16,
}

impl Transformer {
    pub fn new(from_epsg: u16, to_epsg: u16) -> Result<Self> {
        let from = format!("EPSG:{}", from_epsg);
        let to = format!("EPSG:{}", to_epsg);

        let proj = Proj::new_known_crs(&from, &to, None)
            .map_err(|e| Error::Projection(format!("Failed to create projection: {}", e)))?;

        Ok(Self {
            proj,
            from_epsg,
            to_epsg,
        })
    }

    pub fn transform(&self, coord: Coordinate) -> Result<Coordinate> {
        if self.from_epsg == self.to_epsg {
            return Ok(coord);
        }
        let result = self
            .proj
            .convert((coord.x, coord.y))
            .map_err(|e| Error::Projection(format!("Transformation failed: {}", e)))?;

        Ok(Coordinate::new(result.0, result.1))
    }

    pub fn from_epsg(&self) -> u16 {
        self.from_epsg
    }

    pub fn to_epsg(&self) -> u16 {
        self.to_epsg
    }
}

/// Wellhead placed in its Gauss–Krüger zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZonedWellhead {
    pub zone: GaussKrugerZone,
    pub epsg: u16,
    /// Wellhead in zone grid coordinates
    pub grid: Coordinate,
    /// Meridian convergence at the wellhead, degrees
    pub convergence: f64,
}

/// Locates a wellhead given in `source_epsg` within its Gauss–Krüger zone
pub fn locate_wellhead(wellhead: Coordinate, source_epsg: u16) -> Result<ZonedWellhead> {
    let geographic = Transformer::new(source_epsg, PULKOVO_1942)?.transform(wellhead)?;
    let (lon, lat) = (geographic.x, geographic.y);

    let zone = GaussKrugerZone::from_longitude(lon)?;
    let epsg = zone.epsg().ok_or_else(|| {
        Error::Projection(format!(
            "Gauss-Krüger zone {} has no Pulkovo 1942 EPSG code",
            zone.number()
        ))
    })?;
    let grid = Transformer::new(source_epsg, epsg)?.transform(wellhead)?;

    Ok(ZonedWellhead {
        zone,
        epsg,
        grid,
        convergence: zone.convergence(lon, lat),
    })
}
