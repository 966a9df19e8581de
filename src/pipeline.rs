//! End-to-end processing of configured wells
//!
//! survey table -> stations -> trajectory -> {report, plan-view geometry,
//! marker table}. Every well is processed independently, so batches run in
//! parallel without shared state.

use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Read};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::WellConfig;
use crate::error::{Error, Result};
use crate::export::{GeometryExporter, ReportExporter, ReportHeader};
use crate::io::{read_markers, SurveyReader};
use crate::trajectory::{Trajectory, TrajectoryCalculator};
use crate::types::Position;

/// Map placement of the wellhead used for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    /// Wellhead in output map coordinates, z = 0
    pub origin: Position,
    pub epsg: Option<u16>,
    pub meridian_convergence: f64,
}

impl MapFrame {
    /// Frame taken verbatim from the config
    pub fn from_config(config: &WellConfig) -> Self {
        Self {
            origin: Position::new(config.wellhead.x, config.wellhead.y, 0.0),
            epsg: config.wellhead.epsg,
            meridian_convergence: config.calculation.meridian_convergence,
        }
    }

    /// Frame for the config, re-projecting the wellhead when requested
    pub fn resolve(config: &WellConfig) -> Result<Self> {
        if !config.calculation.auto_convergence {
            return Ok(Self::from_config(config));
        }
        Self::zoned(config)
    }

    #[cfg(feature = "georef")]
    fn zoned(config: &WellConfig) -> Result<Self> {
        use crate::projection::{transformer::locate_wellhead, Coordinate};

        let source = config
            .wellhead
            .epsg
            .ok_or_else(|| Error::Config("auto_convergence requires wellhead.epsg".to_string()))?;
        let located = locate_wellhead(Coordinate::new(config.wellhead.x, config.wellhead.y), source)?;
        info!(
            zone = located.zone.number(),
            epsg = located.epsg,
            convergence = located.convergence,
            "wellhead placed in Gauss-Krüger zone"
        );

        Ok(Self {
            origin: Position::new(located.grid.x, located.grid.y, 0.0),
            epsg: Some(located.epsg),
            meridian_convergence: located.convergence,
        })
    }

    #[cfg(not(feature = "georef"))]
    fn zoned(_config: &WellConfig) -> Result<Self> {
        Err(Error::Unsupported(
            "auto_convergence needs the `georef` feature".to_string(),
        ))
    }
}

/// Computed well ready for export
#[derive(Debug, Clone)]
pub struct WellRun {
    pub name: String,
    pub frame: MapFrame,
    pub magnetic_declination: f64,
    pub trajectory: Trajectory,
}

impl WellRun {
    pub fn report_header(&self) -> ReportHeader {
        ReportHeader {
            meridian_convergence: self.frame.meridian_convergence,
            magnetic_declination: self.magnetic_declination,
        }
    }
}

/// Files written for one well
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub well: String,
    pub stations: usize,
    pub report: PathBuf,
    pub geometry: PathBuf,
    pub markers: Option<PathBuf>,
}

/// Reads the configured survey file and computes the trajectory
pub fn compute_well(config: &WellConfig) -> Result<WellRun> {
    let path = config
        .input
        .path
        .as_ref()
        .ok_or_else(|| Error::Config("input.path is not set".to_string()))?;
    let file = File::open(path)?;
    info!(well = %config.well.name, path = %path.display(), "reading survey");
    compute_well_from(config, file)
}

/// Computes the trajectory from an already opened survey table
pub fn compute_well_from<R: Read>(config: &WellConfig, survey: R) -> Result<WellRun> {
    let frame = MapFrame::resolve(config)?;
    let stations = SurveyReader::new(config.reader_options()?).read(survey, config.input.mode)?;

    let settings = config.calculation_settings(frame.origin, frame.meridian_convergence);
    let trajectory = TrajectoryCalculator::new(settings).compute_stations(stations, config.input.mode)?;

    info!(
        well = %config.well.name,
        mode = %trajectory.mode(),
        method = %trajectory.method(),
        points = trajectory.len(),
        displacement = trajectory.horizontal_displacement(),
        "trajectory ready"
    );

    Ok(WellRun {
        name: config.well.name.clone(),
        frame,
        magnetic_declination: settings.magnetic_declination,
        trajectory,
    })
}

/// Computes one well and writes all of its outputs
pub fn run(config: &WellConfig) -> Result<RunSummary> {
    let start = Instant::now();
    let well = compute_well(config)?;

    fs::create_dir_all(&config.output.directory)?;

    let report = config.report_path();
    let exporter = ReportExporter::new(config.report_options());
    let mut writer = BufWriter::new(File::create(&report)?);
    exporter.write(&mut writer, &well.trajectory, &well.report_header())?;

    let geometry = config.geometry_path();
    let trace = well.trajectory.horizontal_trace();
    if trace.is_degenerate() {
        warn!(well = %well.name, "single-station survey, writing point geometry");
    }
    let mut writer = BufWriter::new(File::create(&geometry)?);
    GeometryExporter::new(&well.name, well.frame.epsg).write(&mut writer, &trace, config.output.geometry)?;

    let markers = match &config.input.markers {
        Some(source) => {
            let table = read_markers(
                File::open(source)?,
                config.delimiter_byte()?,
                &config.input.marker_columns,
            )?;
            let path = config.markers_path();
            let mut writer = BufWriter::new(File::create(&path)?);
            exporter.write_markers(&mut writer, &well.trajectory, &table)?;
            Some(path)
        }
        None => None,
    };

    info!(
        well = %well.name,
        report = %report.display(),
        geometry = %geometry.display(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "outputs written"
    );

    Ok(RunSummary {
        well: well.name,
        stations: well.trajectory.len(),
        report,
        geometry,
        markers,
    })
}

/// Runs independent wells in parallel, keeping input order in the results
pub fn run_batch(configs: &[WellConfig]) -> Vec<Result<RunSummary>> {
    configs
        .par_iter()
        .map(|config| {
            run(config).inspect_err(|e| warn!(well = %config.well.name, error = %e, "well failed"))
        })
        .collect()
}
