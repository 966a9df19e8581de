//! Report and geometry output

pub mod geometry;
pub mod report;

pub use geometry::{GeometryExporter, GeometryFormat, TraceGeometry};
pub use report::{ReportExporter, ReportHeader, ReportOptions};
