//! Delimited survey table reader

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::columns::{parse_number, ColumnMap, ColumnRef};
use crate::error::{Error, Result};
use crate::trajectory::methods::normalize_azimuth;
use crate::types::{CalculationMode, HorizontalOffset, SurveyStation};

/// Meaning of the Dx/Dy columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetConvention {
    /// Each row holds the displacement since the previous row
    #[default]
    Interval,
    /// Each row holds the offset from the wellhead
    Cumulative,
}

/// Layout of a survey table
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderOptions {
    pub delimiter: u8,
    pub has_headers: bool,
    pub columns: ColumnMap,
    pub offsets: OffsetConvention,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            has_headers: true,
            columns: ColumnMap::default(),
            offsets: OffsetConvention::Interval,
        }
    }
}

/// Resolved field positions for one table
struct FieldIndexes {
    md: Option<usize>,
    inclination: Option<usize>,
    azimuth: Option<usize>,
    offsets: Option<(usize, usize)>,
    depth: Option<usize>,
}

/// Reads survey stations from delimited text
#[derive(Debug, Clone, Default)]
pub struct SurveyReader {
    options: ReaderOptions,
}

impl SurveyReader {
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Opens and reads a survey file
    pub fn read_path<P: AsRef<Path>>(&self, path: P, mode: CalculationMode) -> Result<Vec<SurveyStation>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let stations = self.read(file, mode)?;
        info!(path = %path.display(), stations = stations.len(), %mode, "survey loaded");
        Ok(stations)
    }

    /// Reads stations from any byte source
    ///
    /// Dx/Dy columns are only required in DxDy mode; the azimuth column may
    /// be absent there too. A configured depth column in DxDy mode turns the
    /// table into an X/Y/depth listing: TVD deltas come from the depth
    /// column, and md, inclination and azimuth fall back to the interval
    /// chord when their columns are missing.
    pub fn read<R: Read>(&self, source: R, mode: CalculationMode) -> Result<Vec<SurveyStation>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .has_headers(self.options.has_headers)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(source);

        let headers = if self.options.has_headers {
            Some(reader.headers()?.clone())
        } else {
            None
        };
        let fields = self.resolve(headers.as_ref(), mode)?;
        let columns = &self.options.columns;

        let mut stations = Vec::new();
        let mut depths = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let cell = |index: Option<usize>, column: &ColumnRef| -> Result<f64> {
                match index {
                    Some(index) => number(&record, index, column, line),
                    None => Ok(0.0),
                }
            };

            let offset = match fields.offsets {
                Some((dx, dy)) => Some(HorizontalOffset::new(
                    cell(Some(dx), &columns.dx)?,
                    cell(Some(dy), &columns.dy)?,
                )),
                None => None,
            };
            if let (Some(index), Some(column)) = (fields.depth, columns.tvd.as_ref()) {
                depths.push(cell(Some(index), column)?);
            }

            stations.push(SurveyStation {
                md: cell(fields.md, &columns.md)?,
                inclination: cell(fields.inclination, &columns.inclination)?,
                azimuth: cell(fields.azimuth, &columns.azimuth)?,
                offset,
                vertical: None,
            });
        }

        if self.options.offsets == OffsetConvention::Cumulative {
            difference_offsets(&mut stations);
        }
        if fields.depth.is_some() {
            apply_depths(&mut stations, &depths, &fields);
        }

        debug!(rows = stations.len(), "survey table parsed");
        Ok(stations)
    }

    fn resolve(&self, headers: Option<&csv::StringRecord>, mode: CalculationMode) -> Result<FieldIndexes> {
        let columns = &self.options.columns;

        match mode {
            CalculationMode::Angle => Ok(FieldIndexes {
                md: Some(columns.md.resolve(headers)?),
                inclination: Some(columns.inclination.resolve(headers)?),
                azimuth: Some(columns.azimuth.resolve(headers)?),
                offsets: None,
                depth: None,
            }),
            CalculationMode::DxDy => {
                let offsets = Some((columns.dx.resolve(headers)?, columns.dy.resolve(headers)?));
                let azimuth = columns.azimuth.resolve(headers).ok();
                match &columns.tvd {
                    Some(tvd) => Ok(FieldIndexes {
                        md: columns.md.resolve(headers).ok(),
                        inclination: columns.inclination.resolve(headers).ok(),
                        azimuth,
                        offsets,
                        depth: Some(tvd.resolve(headers)?),
                    }),
                    None => Ok(FieldIndexes {
                        md: Some(columns.md.resolve(headers)?),
                        inclination: Some(columns.inclination.resolve(headers)?),
                        azimuth,
                        offsets,
                        depth: None,
                    }),
                }
            }
        }
    }
}

fn number(record: &csv::StringRecord, index: usize, column: &ColumnRef, line: u64) -> Result<f64> {
    let raw = record.get(index).ok_or_else(|| {
        Error::InvalidFormat(format!("line {}: missing column {}", line, column))
    })?;
    parse_number(raw).ok_or_else(|| {
        Error::InvalidFormat(format!(
            "line {}: column {} value '{}' is not a number",
            line,
            column,
            raw.trim()
        ))
    })
}

/// Turns wellhead-relative offsets into per-interval deltas
fn difference_offsets(stations: &mut [SurveyStation]) {
    let mut previous = HorizontalOffset::new(0.0, 0.0);
    for station in stations.iter_mut() {
        if let Some(cumulative) = station.offset {
            station.offset = Some(HorizontalOffset::new(
                cumulative.dx - previous.dx,
                cumulative.dy - previous.dy,
            ));
            previous = cumulative;
        }
    }
}

/// Fills per-interval TVD deltas from a depth column
///
/// Missing md becomes the running 3D chord length from the first row,
/// missing inclination and azimuth the chord's attitude. Expects
/// per-interval offsets.
fn apply_depths(stations: &mut [SurveyStation], depths: &[f64], fields: &FieldIndexes) {
    let mut md = 0.0;
    for (station, pair) in stations.iter_mut().skip(1).zip(depths.windows(2)) {
        let dz = pair[1] - pair[0];
        let (dx, dy) = station.offset.map(|o| (o.dx, o.dy)).unwrap_or((0.0, 0.0));
        let horizontal = dx.hypot(dy);
        let chord = horizontal.hypot(dz);

        station.vertical = Some(dz);
        md += chord;
        if fields.md.is_none() {
            station.md = md;
        }
        if fields.inclination.is_none() && chord > 0.0 {
            station.inclination = (dz / chord).clamp(-1.0, 1.0).acos().to_degrees();
        }
        if fields.azimuth.is_none() && horizontal > 0.0 {
            station.azimuth = normalize_azimuth(dx.atan2(dy).to_degrees());
        }
    }
}
