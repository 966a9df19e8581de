//! Well run configuration
//!
//! One TOML file describes one well: where the survey lives, how to read
//! it, how to compute it, and where the outputs go. Every section has
//! defaults, so a minimal file only names the input.
//!
//! ```toml
//! [well]
//! name = "W-12"
//!
//! [wellhead]
//! x = 12580000.0
//! y = 6765000.0
//! altitude = 87.4
//! epsg = 28412
//!
//! [input]
//! path = "W-12_survey.txt"
//! mode = "angle"
//!
//! [calculation]
//! method = "minimum_curvature"
//! magnetic_declination = 14.2
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Error, Result};
use crate::export::{GeometryFormat, ReportOptions};
use crate::io::{ColumnMap, MarkerOptions, OffsetConvention, ReaderOptions};
use crate::trajectory::CalculationSettings;
use crate::types::{CalculationMode, Position, SurveyMethod};

/// Root configuration for one well
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WellConfig {
    #[serde(default)]
    pub well: WellInfo,

    #[serde(default)]
    pub wellhead: WellheadConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub calculation: CalculationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellInfo {
    #[serde(default = "default_well_name")]
    pub name: String,
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            name: default_well_name(),
        }
    }
}

fn default_well_name() -> String {
    "well".to_string()
}

/// Wellhead location in map coordinates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WellheadConfig {
    pub x: f64,
    pub y: f64,
    /// Elevation of the depth reference above datum
    pub altitude: f64,
    /// Reference system of `x`/`y` and of the output geometry
    pub epsg: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: Option<PathBuf>,
    pub delimiter: char,
    pub has_headers: bool,
    pub mode: CalculationMode,
    pub offsets: OffsetConvention,
    pub columns: ColumnMap,
    /// Optional table of named depths to locate along the well
    pub markers: Option<PathBuf>,
    pub marker_columns: MarkerOptions,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: '\t',
            has_headers: true,
            mode: CalculationMode::Angle,
            offsets: OffsetConvention::Interval,
            columns: ColumnMap::default(),
            markers: None,
            marker_columns: MarkerOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationConfig {
    pub method: SurveyMethod,
    /// Degrees east of true north; ignored in DxDy mode
    pub magnetic_declination: f64,
    /// Degrees; replaced by the computed value when `auto_convergence` is set
    pub meridian_convergence: f64,
    /// Derive zone, convergence and grid wellhead from `wellhead.epsg`
    pub auto_convergence: bool,
    pub synthesize_surface: bool,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            method: SurveyMethod::MinimumCurvature,
            magnetic_declination: 0.0,
            meridian_convergence: 0.0,
            auto_convergence: false,
            synthesize_surface: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub precision: usize,
    pub angle_precision: usize,
    pub geometry: GeometryFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            precision: 3,
            angle_precision: 2,
            geometry: GeometryFormat::GeoJson,
        }
    }
}

impl WellConfig {
    /// Loads and validates a TOML config file
    ///
    /// Relative input, marker and output paths are resolved against the
    /// config file's directory.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        info!(path = %path.display(), well = %config.well.name, "loaded well config");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Range checks, collected into one error
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.well.name.trim().is_empty() {
            errors.push("well.name must not be empty".to_string());
        }
        if self.well.name.contains(['/', '\\']) {
            errors.push(format!("well.name '{}' must not contain path separators", self.well.name));
        }
        if self.well.name.chars().any(|c| c == '"' || c.is_control()) {
            errors.push(format!(
                "well.name '{}' must not contain quotes or control characters",
                self.well.name.escape_default()
            ));
        }
        for (name, value) in [
            ("wellhead.x", self.wellhead.x),
            ("wellhead.y", self.wellhead.y),
            ("wellhead.altitude", self.wellhead.altitude),
            ("calculation.magnetic_declination", self.calculation.magnetic_declination),
            ("calculation.meridian_convergence", self.calculation.meridian_convergence),
        ] {
            if !value.is_finite() {
                errors.push(format!("{} must be a finite number", name));
            }
        }
        if self.calculation.magnetic_declination.abs() > 180.0 {
            errors.push(format!(
                "calculation.magnetic_declination {} outside [-180, 180]",
                self.calculation.magnetic_declination
            ));
        }
        if self.calculation.meridian_convergence.abs() > 180.0 {
            errors.push(format!(
                "calculation.meridian_convergence {} outside [-180, 180]",
                self.calculation.meridian_convergence
            ));
        }
        if self.calculation.auto_convergence && self.wellhead.epsg.is_none() {
            errors.push("calculation.auto_convergence requires wellhead.epsg".to_string());
        }
        if let Err(Error::Config(message)) = self.delimiter_byte() {
            errors.push(message);
        }
        if self.output.precision > 12 || self.output.angle_precision > 12 {
            errors.push("output precision must not exceed 12 decimal places".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(errors.join("; ")))
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(path) = self.input.path.as_mut() {
            resolve(path);
        }
        if let Some(path) = self.input.markers.as_mut() {
            resolve(path);
        }
        resolve(&mut self.output.directory);
    }

    pub fn reader_options(&self) -> Result<ReaderOptions> {
        Ok(ReaderOptions {
            delimiter: self.delimiter_byte()?,
            has_headers: self.input.has_headers,
            columns: self.input.columns.clone(),
            offsets: self.input.offsets,
        })
    }

    /// Input delimiter as the single byte the csv reader needs
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.input.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                Error::Config(format!(
                    "input.delimiter '{}' must be a single ASCII character",
                    self.input.delimiter.escape_default()
                ))
            })
    }

    /// Calculation settings for a wellhead at `origin`
    pub fn calculation_settings(&self, origin: Position, meridian_convergence: f64) -> CalculationSettings {
        CalculationSettings {
            method: self.calculation.method,
            origin,
            magnetic_declination: match self.input.mode {
                CalculationMode::Angle => self.calculation.magnetic_declination,
                CalculationMode::DxDy => 0.0,
            },
            meridian_convergence,
            synthesize_surface: self.calculation.synthesize_surface,
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            precision: self.output.precision,
            angle_precision: self.output.angle_precision,
            delimiter: '\t',
            elevation: self.wellhead.altitude,
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.output
            .directory
            .join(format!("{}_inclination.dat", self.well.name))
    }

    pub fn geometry_path(&self) -> PathBuf {
        self.output.directory.join(format!(
            "{}_hor_trace.{}",
            self.well.name,
            self.output.geometry.extension()
        ))
    }

    pub fn markers_path(&self) -> PathBuf {
        self.output
            .directory
            .join(format!("{}_MD_Points.dat", self.well.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ColumnRef;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = WellConfig::from_toml_str("[input]\npath = \"survey.txt\"\n").unwrap();
        assert_eq!(config.well.name, "well");
        assert_eq!(config.input.mode, CalculationMode::Angle);
        assert_eq!(config.input.delimiter, '\t');
        assert_eq!(config.calculation.method, SurveyMethod::MinimumCurvature);
        assert!(config.calculation.synthesize_surface);
        assert_eq!(config.output.geometry, GeometryFormat::GeoJson);
    }

    #[test]
    fn test_full_config() {
        let toml_str = r#"
[well]
name = "W-12"

[wellhead]
x = 12580000.0
y = 6765000.0
altitude = 87.4
epsg = 28412

[input]
path = "W-12.txt"
delimiter = ";"
mode = "dxdy"
offsets = "cumulative"

[input.columns]
md = 0
inclination = "Zenith"
dx = "East"
dy = "North"

[calculation]
method = "average_angle"
meridian_convergence = 1.3

[output]
precision = 2
geometry = "wkt"
"#;
        let config = WellConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.wellhead.epsg, Some(28412));
        assert_eq!(config.input.mode, CalculationMode::DxDy);
        assert_eq!(config.input.offsets, OffsetConvention::Cumulative);
        assert_eq!(config.input.columns.md, ColumnRef::Index(0));
        assert_eq!(config.input.columns.inclination, ColumnRef::name("Zenith"));
        assert_eq!(config.input.columns.azimuth, ColumnRef::name("Az"));
        assert_eq!(config.calculation.method, SurveyMethod::AverageAngle);
        assert_eq!(config.reader_options().unwrap().delimiter, b';');
        assert_eq!(config.geometry_path(), PathBuf::from("./W-12_hor_trace.wkt"));
    }

    #[test]
    fn test_dxdy_ignores_declination() {
        let mut config = WellConfig::default();
        config.calculation.magnetic_declination = 12.0;
        config.input.mode = CalculationMode::DxDy;
        let settings = config.calculation_settings(Position::default(), 0.5);
        assert_eq!(settings.magnetic_declination, 0.0);
        assert_eq!(settings.meridian_convergence, 0.5);
    }

    #[test]
    fn test_validation_collects_errors() {
        let toml_str = r#"
[well]
name = ""

[calculation]
magnetic_declination = 400.0
auto_convergence = true
"#;
        match WellConfig::from_toml_str(toml_str) {
            Err(Error::Config(message)) => {
                assert!(message.contains("well.name"));
                assert!(message.contains("magnetic_declination"));
                assert!(message.contains("auto_convergence"));
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let mut config = WellConfig::default();
        config.input.delimiter = 'é';
        assert!(matches!(config.reader_options(), Err(Error::Config(_))));
        assert!(matches!(config.validate(), Err(Error::Config(m)) if m.contains("input.delimiter")));

        config.input.delimiter = '|';
        assert_eq!(config.reader_options().unwrap().delimiter, b'|');
    }

    #[test]
    fn test_well_name_rejects_header_breaking_characters() {
        for name in ["W\"1\"", "W-1\r\nX-Injected: 1", "W\t1"] {
            let mut config = WellConfig::default();
            config.well.name = name.to_string();
            match config.validate() {
                Err(Error::Config(message)) => assert!(message.contains("well.name"), "{}", message),
                other => panic!("expected config error for {:?}, got {:?}", name, other),
            }
        }

        let mut config = WellConfig::default();
        config.well.name = "Куст 12/бис".replace('/', "-");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_depth_column_config() {
        let config = WellConfig::from_toml_str(
            "[input]\nmode = \"dxdy\"\noffsets = \"cumulative\"\n[input.columns]\ntvd = \"Depth\"\n",
        )
        .unwrap();
        assert_eq!(config.input.columns.tvd, Some(ColumnRef::name("Depth")));
        assert_eq!(WellConfig::default().input.columns.tvd, None);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = WellConfig::from_toml_str("[input]\nmode = \"spline\"\n");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = WellConfig::default();
        config.well.name = "W-7".to_string();
        config.wellhead.epsg = Some(28407);
        let text = config.to_toml().unwrap();
        assert_eq!(WellConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("well.toml");
        std::fs::write(&path, "[input]\npath = \"survey.txt\"\n").unwrap();

        let config = WellConfig::load_from_file(&path).unwrap();
        assert_eq!(config.input.path, Some(dir.path().join("survey.txt")));
        assert_eq!(config.output.directory, dir.path().join("."));
    }
}
