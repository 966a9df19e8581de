//! Fixed-precision text report of computed stations

use std::fmt::Write as _;
use std::io;
use tracing::warn;

use crate::io::Marker;
use crate::trajectory::Trajectory;

/// Formatting of the station report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Decimal places for depths and coordinates
    pub precision: usize,
    /// Decimal places for angles
    pub angle_precision: usize,
    pub delimiter: char,
    /// Wellhead elevation; the Altitude column is `elevation - TVD`
    pub elevation: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            precision: 3,
            angle_precision: 2,
            delimiter: '\t',
            elevation: 0.0,
        }
    }
}

/// Angle corrections printed above the table
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReportHeader {
    pub meridian_convergence: f64,
    pub magnetic_declination: f64,
}

pub const REPORT_COLUMNS: [&str; 7] = ["MD", "Incl", "Az", "X", "Y", "TVD", "Altitude"];
pub const MARKER_COLUMNS: [&str; 6] = ["Point", "MD", "X", "Y", "TVD", "Altitude"];

/// Formats trajectories as delimited text tables
#[derive(Debug, Clone, Default)]
pub struct ReportExporter {
    options: ReportOptions,
}

impl ReportExporter {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Renders the station report
    pub fn render(&self, trajectory: &Trajectory, header: &ReportHeader) -> String {
        let opts = &self.options;
        let (p, ap) = (opts.precision, opts.angle_precision);
        let mut out = String::with_capacity(64 * (trajectory.len() + 3));

        let _ = writeln!(out, "Meridian convergence = {:.6}", header.meridian_convergence);
        let _ = writeln!(out, "Magnetic declination = {:.6}", header.magnetic_declination);
        self.push_header(&mut out, &REPORT_COLUMNS);

        let d = opts.delimiter;
        for point in trajectory.points() {
            let _ = writeln!(
                out,
                "{md:.p$}{d}{inc:.ap$}{d}{az:.ap$}{d}{x:.p$}{d}{y:.p$}{d}{tvd:.p$}{d}{alt:.p$}",
                md = point.md,
                inc = point.inclination,
                az = point.azimuth,
                x = point.x(),
                y = point.y(),
                tvd = point.tvd(),
                alt = opts.elevation - point.tvd(),
            );
        }

        out
    }

    /// Writes the station report
    pub fn write<W: io::Write>(&self, writer: &mut W, trajectory: &Trajectory, header: &ReportHeader) -> io::Result<()> {
        writer.write_all(self.render(trajectory, header).as_bytes())?;
        writer.flush()
    }

    /// Renders interpolated marker positions
    ///
    /// Markers outside the surveyed depth range are skipped.
    pub fn render_markers(&self, trajectory: &Trajectory, markers: &[Marker]) -> String {
        let opts = &self.options;
        let p = opts.precision;
        let d = opts.delimiter;
        let mut out = String::new();
        self.push_header(&mut out, &MARKER_COLUMNS);

        for marker in markers {
            let Some(point) = trajectory.interpolate(marker.md) else {
                warn!(marker = %marker.name, md = marker.md, "marker outside surveyed depth range, skipped");
                continue;
            };
            let _ = writeln!(
                out,
                "{name}{d}{md:.p$}{d}{x:.p$}{d}{y:.p$}{d}{tvd:.p$}{d}{alt:.p$}",
                name = self.cell_text(&marker.name),
                md = point.md,
                x = point.x(),
                y = point.y(),
                tvd = point.tvd(),
                alt = opts.elevation - point.tvd(),
            );
        }

        out
    }

    pub fn write_markers<W: io::Write>(&self, writer: &mut W, trajectory: &Trajectory, markers: &[Marker]) -> io::Result<()> {
        writer.write_all(self.render_markers(trajectory, markers).as_bytes())?;
        writer.flush()
    }

    /// Free text with the delimiter and control characters blanked out
    fn cell_text(&self, text: &str) -> String {
        let delimiter = self.options.delimiter;
        text.chars()
            .map(|c| if c == delimiter || c.is_control() { ' ' } else { c })
            .collect()
    }

    fn push_header(&self, out: &mut String, columns: &[&str]) {
        let delimiter = self.options.delimiter.to_string();
        out.push_str(&columns.join(&delimiter));
        out.push('\n');
    }
}
