//! Plan-view geometry records for GIS layers

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io;

use crate::error::{Error, Result};
use crate::projection::HorizontalTrace;

/// Output encoding of the trace geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryFormat {
    #[default]
    GeoJson,
    Wkt,
}

impl GeometryFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            GeometryFormat::GeoJson => "geojson",
            GeometryFormat::Wkt => "wkt",
        }
    }
}

/// A point or line geometry in GeoJSON layout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum TraceGeometry {
    Point([f64; 2]),
    LineString(Vec<[f64; 2]>),
}

impl TraceGeometry {
    /// Line through every vertex in order, or a point for a one-station well
    pub fn from_trace(trace: &HorizontalTrace) -> Result<Self> {
        match trace.vertices() {
            [] => Err(Error::InvalidFormat("cannot build geometry from an empty trace".to_string())),
            [only] => Ok(TraceGeometry::Point(only.to_array())),
            vertices => Ok(TraceGeometry::LineString(
                vertices.iter().map(|v| v.to_array()).collect(),
            )),
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            TraceGeometry::Point(_) => 1,
            TraceGeometry::LineString(v) => v.len(),
        }
    }

    /// Well-known-text encoding
    pub fn to_wkt(&self) -> String {
        match self {
            TraceGeometry::Point([x, y]) => format!("POINT ({} {})", x, y),
            TraceGeometry::LineString(vertices) => {
                let mut out = String::from("LINESTRING (");
                for (i, [x, y]) in vertices.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{} {}", x, y);
                }
                out.push(')');
                out
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct FeatureCollection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    crs: Option<NamedCrs>,
    features: [Feature<'a>; 1],
}

#[derive(Debug, Serialize)]
struct NamedCrs {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: CrsName,
}

#[derive(Debug, Serialize)]
struct CrsName {
    name: String,
}

#[derive(Debug, Serialize)]
struct Feature<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: WellProperties<'a>,
    geometry: &'a TraceGeometry,
}

#[derive(Debug, Serialize)]
struct WellProperties<'a> {
    #[serde(rename = "WellName")]
    well_name: &'a str,
}

/// Packages a horizontal trace as a single-feature vector record
#[derive(Debug, Clone)]
pub struct GeometryExporter {
    well_name: String,
    epsg: Option<u16>,
}

impl GeometryExporter {
    /// `epsg` tags the output with the map's reference system when known
    pub fn new(well_name: &str, epsg: Option<u16>) -> Self {
        Self {
            well_name: well_name.to_string(),
            epsg,
        }
    }

    pub fn epsg(&self) -> Option<u16> {
        self.epsg
    }

    /// GeoJSON FeatureCollection value with one feature
    pub fn to_geojson(&self, trace: &HorizontalTrace) -> Result<serde_json::Value> {
        let geometry = TraceGeometry::from_trace(trace)?;
        let collection = FeatureCollection {
            kind: "FeatureCollection",
            name: &self.well_name,
            crs: self.epsg.map(|code| NamedCrs {
                kind: "name",
                properties: CrsName {
                    name: format!("urn:ogc:def:crs:EPSG::{}", code),
                },
            }),
            features: [Feature {
                kind: "Feature",
                properties: WellProperties {
                    well_name: &self.well_name,
                },
                geometry: &geometry,
            }],
        };
        Ok(serde_json::to_value(&collection)?)
    }

    /// Renders the trace in `format`
    pub fn render(&self, trace: &HorizontalTrace, format: GeometryFormat) -> Result<String> {
        match format {
            GeometryFormat::GeoJson => Ok(serde_json::to_string_pretty(&self.to_geojson(trace)?)?),
            GeometryFormat::Wkt => {
                let wkt = TraceGeometry::from_trace(trace)?.to_wkt();
                Ok(match self.epsg {
                    Some(code) => format!("SRID={};{}\n", code, wkt),
                    None => format!("{}\n", wkt),
                })
            }
        }
    }

    pub fn write<W: io::Write>(&self, writer: &mut W, trace: &HorizontalTrace, format: GeometryFormat) -> Result<()> {
        writer.write_all(self.render(trace, format)?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::{CalculationSettings, TrajectoryCalculator};
    use crate::types::{CalculationMode, Position, SurveyStation};

    fn trace(stations: Vec<SurveyStation>) -> HorizontalTrace {
        let settings = CalculationSettings {
            origin: Position::new(500.0, 700.0, 0.0),
            ..Default::default()
        };
        TrajectoryCalculator::new(settings)
            .compute_stations(stations, CalculationMode::Angle)
            .unwrap()
            .horizontal_trace()
    }

    fn deviated() -> HorizontalTrace {
        trace(vec![
            SurveyStation::new(0.0, 0.0, 0.0),
            SurveyStation::new(100.0, 10.0, 90.0),
            SurveyStation::new(200.0, 20.0, 90.0),
        ])
    }

    #[test]
    fn test_line_geometry_keeps_order() {
        let trace = deviated();
        let geometry = TraceGeometry::from_trace(&trace).unwrap();
        assert_eq!(geometry.vertex_count(), 3);
        match geometry {
            TraceGeometry::LineString(vertices) => {
                assert_eq!(vertices[0], [500.0, 700.0]);
                for (v, c) in vertices.iter().zip(trace.vertices()) {
                    assert_eq!(*v, c.to_array());
                }
                assert!(vertices[2][0] > vertices[1][0]);
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn test_single_station_point_geometry() {
        let trace = trace(vec![SurveyStation::new(0.0, 0.0, 0.0)]);
        let geometry = TraceGeometry::from_trace(&trace).unwrap();
        assert_eq!(geometry, TraceGeometry::Point([500.0, 700.0]));
        assert_eq!(geometry.to_wkt(), "POINT (500 700)");
    }

    #[test]
    fn test_geojson_layout() {
        let value = GeometryExporter::new("W-12", Some(28412)).to_geojson(&deviated()).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["crs"]["properties"]["name"], "urn:ogc:def:crs:EPSG::28412");
        let feature = &value["features"][0];
        assert_eq!(feature["properties"]["WellName"], "W-12");
        assert_eq!(feature["geometry"]["type"], "LineString");
        assert_eq!(feature["geometry"]["coordinates"].as_array().unwrap().len(), 3);
        assert_eq!(feature["geometry"]["coordinates"][0][0], 500.0);
    }

    #[test]
    fn test_geojson_without_crs() {
        let value = GeometryExporter::new("W-1", None).to_geojson(&deviated()).unwrap();
        assert!(value.get("crs").is_none());
    }

    #[test]
    fn test_wkt_render() {
        let text = GeometryExporter::new("W-1", Some(28407))
            .render(&deviated(), GeometryFormat::Wkt)
            .unwrap();
        assert!(text.starts_with("SRID=28407;LINESTRING (500 700, "));
        assert!(text.ends_with(")\n"));
    }
}
