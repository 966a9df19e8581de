//! Column selection for delimited tables

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A column chosen by zero-based position or by header name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl ColumnRef {
    pub fn name(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }

    /// Resolves to a field index, matching names case-insensitively
    pub fn resolve(&self, headers: Option<&csv::StringRecord>) -> Result<usize> {
        match self {
            ColumnRef::Index(index) => Ok(*index),
            ColumnRef::Name(name) => {
                let headers = headers.ok_or_else(|| {
                    Error::Config(format!(
                        "column '{}' selected by name but the table has no header row",
                        name
                    ))
                })?;
                headers
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
                    .ok_or_else(|| Error::InvalidFormat(format!("column '{}' not found in header", name)))
            }
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(index) => write!(f, "#{}", index),
            ColumnRef::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Where each survey quantity lives in the input table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub md: ColumnRef,
    pub inclination: ColumnRef,
    pub azimuth: ColumnRef,
    pub dx: ColumnRef,
    pub dy: ColumnRef,
    /// Vertical depth column; in DxDy mode it supplies the TVD deltas and
    /// makes the md and inclination columns optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvd: Option<ColumnRef>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            md: ColumnRef::name("MD"),
            inclination: ColumnRef::name("Incl"),
            azimuth: ColumnRef::name("Az"),
            dx: ColumnRef::name("Dx"),
            dy: ColumnRef::name("Dy"),
            tvd: None,
        }
    }
}

/// Parses a numeric cell, accepting a decimal comma
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.replace(',', ".").parse::<f64>().ok())
}
