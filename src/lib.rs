//! welltrace - Wellbore trajectory computation for Rust
//!
//! welltrace turns directional survey stations (measured depth,
//! inclination, azimuth, or per-interval horizontal offsets) into
//! cumulative 3D positions, and exports a fixed-precision station report
//! and a plan-view trace for GIS layers.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use welltrace::{CalculationMode, Survey, SurveyStation, TrajectoryCalculator};
//!
//! let survey = Survey::new(vec![
//!     SurveyStation::new(0.0, 0.0, 0.0),
//!     SurveyStation::new(100.0, 0.0, 45.0),
//!     SurveyStation::new(200.0, 30.0, 45.0),
//! ], CalculationMode::Angle)?;
//!
//! let trajectory = TrajectoryCalculator::default().compute(&survey)?;
//! let bottom = trajectory.last();
//! println!("TD at x={:.2} y={:.2} tvd={:.2}", bottom.x(), bottom.y(), bottom.tvd());
//! # Ok::<(), welltrace::Error>(())
//! ```
//!
//! ## Exporting
//!
//! ```
//! use welltrace::{CalculationMode, GeometryExporter, GeometryFormat, ReportExporter,
//!     ReportHeader, SurveyStation, TrajectoryCalculator};
//!
//! let trajectory = TrajectoryCalculator::default().compute_stations(vec![
//!     SurveyStation::new(0.0, 0.0, 0.0),
//!     SurveyStation::new(150.0, 12.0, 310.0),
//! ], CalculationMode::Angle)?;
//!
//! let report = ReportExporter::default().render(&trajectory, &ReportHeader::default());
//! assert!(report.contains("Altitude"));
//!
//! let trace = trajectory.horizontal_trace();
//! let wkt = GeometryExporter::new("W-1", Some(28412)).render(&trace, GeometryFormat::Wkt)?;
//! assert!(wkt.starts_with("SRID=28412;LINESTRING"));
//! # Ok::<(), welltrace::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod io;
pub mod pipeline;
pub mod projection;
pub mod survey;
pub mod trajectory;
pub mod types;

pub use config::WellConfig;
pub use error::{Error, Result, ValidationError};
pub use export::{GeometryExporter, GeometryFormat, ReportExporter, ReportHeader, ReportOptions};
pub use io::{Marker, SurveyReader};
pub use pipeline::{compute_well, run, run_batch, RunSummary, WellRun};
pub use projection::{Coordinate, GaussKrugerZone, HorizontalTrace};
pub use survey::Survey;
pub use trajectory::{CalculationSettings, Trajectory, TrajectoryCalculator};
pub use types::{CalculationMode, Displacement, HorizontalOffset, Point, Position, SurveyMethod, SurveyStation};
