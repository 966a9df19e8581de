//! Named measured-depth markers (formation tops, perforations, ...)

use serde::{Deserialize, Serialize};
use std::io::Read;

use super::columns::{parse_number, ColumnRef};
use crate::error::{Error, Result};

/// A named depth along the hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    pub md: f64,
}

/// Layout of a marker table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerOptions {
    pub name: ColumnRef,
    pub md: ColumnRef,
    pub has_headers: bool,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            name: ColumnRef::Index(0),
            md: ColumnRef::Index(1),
            has_headers: true,
        }
    }
}

/// Reads a marker table
pub fn read_markers<R: Read>(source: R, delimiter: u8, options: &MarkerOptions) -> Result<Vec<Marker>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(source);

    let headers = if options.has_headers {
        Some(reader.headers()?.clone())
    } else {
        None
    };
    let name_index = options.name.resolve(headers.as_ref())?;
    let md_index = options.md.resolve(headers.as_ref())?;

    let mut markers = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let name = record.get(name_index).map(str::trim).unwrap_or_default();
        let raw_md = record.get(md_index).unwrap_or_default();
        let md = parse_number(raw_md).ok_or_else(|| {
            Error::InvalidFormat(format!("line {}: marker depth '{}' is not a number", line, raw_md.trim()))
        })?;

        markers.push(Marker {
            // quoted cells may carry tabs or line breaks
            name: name.chars().map(|c| if c.is_control() { ' ' } else { c }).collect(),
            md,
        });
    }

    Ok(markers)
}
