//! Survey table input
//!
//! Reads delimited survey and marker tables into stations. Columns are
//! picked by header name or by position.

pub mod columns;
pub mod markers;
pub mod survey_reader;

pub use columns::{ColumnMap, ColumnRef};
pub use markers::{read_markers, Marker, MarkerOptions};
pub use survey_reader::{OffsetConvention, ReaderOptions, SurveyReader};
