//! End-to-end runs from config files to written outputs.

use std::fs;
use std::path::Path;

use welltrace::{pipeline, CalculationMode, Error, GeometryFormat, WellConfig};

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn angle_well_writes_all_outputs() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "survey.txt", "MD\tIncl\tAz\n0\t0\t0\n100\t0\t45\n200\t30\t45\n");
    write(dir.path(), "tops.txt", "Name\tMD\nTop A\t150\nDeep\t900\n");
    write(
        dir.path(),
        "w1.toml",
        r#"
[well]
name = "W-1"

[wellhead]
x = 1000.0
y = 2000.0
altitude = 120.0
epsg = 28412

[input]
path = "survey.txt"
markers = "tops.txt"

[calculation]
magnetic_declination = 0.0

[output]
directory = "out"
"#,
    );

    let config = WellConfig::load_from_file(&dir.path().join("w1.toml")).unwrap();
    let summary = pipeline::run(&config).unwrap();

    assert_eq!(summary.well, "W-1");
    assert_eq!(summary.stations, 3);
    assert_eq!(summary.report, dir.path().join("out").join("W-1_inclination.dat"));

    let report = fs::read_to_string(&summary.report).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "Meridian convergence = 0.000000");
    assert_eq!(lines[2], "MD\tIncl\tAz\tX\tY\tTVD\tAltitude");
    assert_eq!(lines[3], "0.000\t0.00\t0.00\t1000.000\t2000.000\t0.000\t120.000");
    assert_eq!(lines[4], "100.000\t0.00\t45.00\t1000.000\t2000.000\t100.000\t20.000");
    assert_eq!(lines.len(), 6);

    let geometry = fs::read_to_string(&summary.geometry).unwrap();
    assert!(summary.geometry.ends_with("W-1_hor_trace.geojson"));
    let value: serde_json::Value = serde_json::from_str(&geometry).unwrap();
    assert_eq!(value["features"][0]["properties"]["WellName"], "W-1");
    assert_eq!(value["crs"]["properties"]["name"], "urn:ogc:def:crs:EPSG::28412");
    assert_eq!(value["features"][0]["geometry"]["coordinates"].as_array().unwrap().len(), 3);

    let markers = fs::read_to_string(summary.markers.unwrap()).unwrap();
    let rows: Vec<&str> = markers.lines().collect();
    assert_eq!(rows.len(), 2, "marker below TD is skipped");
    assert!(rows[1].starts_with("Top A\t150.000\t"));
}

#[test]
fn dxdy_well_with_cumulative_offsets() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "survey.csv",
        "MD;Incl;Dx;Dy\n0;0;0;0\n100;5;3;4\n200;10;9;12\n",
    );
    write(
        dir.path(),
        "w2.toml",
        r#"
[well]
name = "W-2"

[input]
path = "survey.csv"
delimiter = ";"
mode = "dxdy"
offsets = "cumulative"

[output]
geometry = "wkt"
"#,
    );

    let config = WellConfig::load_from_file(&dir.path().join("w2.toml")).unwrap();
    assert_eq!(config.input.mode, CalculationMode::DxDy);
    assert_eq!(config.output.geometry, GeometryFormat::Wkt);

    let well = pipeline::compute_well(&config).unwrap();
    let last = well.trajectory.last();
    assert!((last.x() - 9.0).abs() < 1e-9);
    assert!((last.y() - 12.0).abs() < 1e-9);

    let summary = pipeline::run(&config).unwrap();
    let wkt = fs::read_to_string(&summary.geometry).unwrap();
    assert_eq!(wkt, "LINESTRING (0 0, 3 4, 9 12)\n");
    assert!(summary.markers.is_none());
}

#[test]
fn xyz_listing_without_md_column() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "xyz.txt", "Dx\tDy\tDepth\n0\t0\t0\n3\t4\t100\n9\t12\t200\n");
    write(
        dir.path(),
        "w3.toml",
        r#"
[well]
name = "W-3"

[wellhead]
x = 500.0
y = 800.0
altitude = 50.0

[input]
path = "xyz.txt"
mode = "dxdy"
offsets = "cumulative"

[input.columns]
tvd = "Depth"
"#,
    );

    let config = WellConfig::load_from_file(&dir.path().join("w3.toml")).unwrap();
    let well = pipeline::compute_well(&config).unwrap();
    let points = well.trajectory.points();
    assert_eq!(points.len(), 3);
    assert!(points.iter().all(|p| !p.synthetic));
    assert_eq!((points[1].x(), points[1].y(), points[1].tvd()), (503.0, 804.0, 100.0));
    assert_eq!((points[2].x(), points[2].y(), points[2].tvd()), (509.0, 812.0, 200.0));
    assert!((points[2].md - (10_025.0f64.sqrt() + 10_100.0f64.sqrt())).abs() < 1e-9);

    let summary = pipeline::run(&config).unwrap();
    let report = fs::read_to_string(&summary.report).unwrap();
    let last = report.lines().last().unwrap();
    assert!(last.ends_with("\t509.000\t812.000\t200.000\t-150.000"), "{}", last);
}

#[test]
fn batch_reports_each_well() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.txt", "MD\tIncl\tAz\n0\t0\t0\n300\t12\t270\n");
    write(dir.path(), "bad.txt", "MD\tIncl\tAz\n0\t0\t0\n300\t200\t270\n");

    let mut configs = Vec::new();
    for (name, survey) in [("A", "a.txt"), ("B", "bad.txt"), ("C", "missing.txt")] {
        let mut config = WellConfig::default();
        config.well.name = name.to_string();
        config.input.path = Some(dir.path().join(survey));
        config.output.directory = dir.path().join("out");
        configs.push(config);
    }

    let results = pipeline::run_batch(&configs);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().well, "A");
    assert!(matches!(results[1], Err(Error::Validation(_))));
    assert!(matches!(results[2], Err(Error::Io(_))));
    assert!(dir.path().join("out").join("A_inclination.dat").exists());
    assert!(!dir.path().join("out").join("B_inclination.dat").exists());
}

#[test]
fn default_config_round_trips() {
    let config = WellConfig::default();
    let text = config.to_toml().unwrap();
    assert!(text.contains("[calculation]"));
    assert_eq!(WellConfig::from_toml_str(&text).unwrap(), config);
}
