use axum::{
    extract::multipart::{Multipart, MultipartError},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::time::Instant;
use tracing::{info, warn};

use crate::config::WellConfig;
use crate::export::{GeometryExporter, ReportExporter};
use crate::pipeline::{compute_well_from, WellRun};
use crate::Error;
use super::models::*;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Computes a trajectory and returns points, report and plan-view GeoJSON
pub async fn compute_trajectory(multipart: Multipart) -> Result<Json<TrajectoryResponse>, ApiError> {
    let start = Instant::now();
    let (config, survey) = read_upload(multipart).await?;
    let well = compute(&config, &survey)?;

    let report = ReportExporter::new(config.report_options()).render(&well.trajectory, &well.report_header());
    let geojson = GeometryExporter::new(&well.name, well.frame.epsg)
        .to_geojson(&well.trajectory.horizontal_trace())
        .map_err(into_api_error)?;

    let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(well = %well.name, points = well.trajectory.len(), execution_time_ms, "trajectory request served");

    Ok(Json(TrajectoryResponse {
        well: well.name,
        mode: well.trajectory.mode(),
        method: well.trajectory.method(),
        epsg: well.frame.epsg,
        meridian_convergence: well.frame.meridian_convergence,
        horizontal_displacement: well.trajectory.horizontal_displacement(),
        points: well.trajectory.points().to_vec(),
        report,
        geojson,
        execution_time_ms,
    }))
}

/// Computes a trajectory and returns only the text report
pub async fn trajectory_report(multipart: Multipart) -> Result<Response, ApiError> {
    let (config, survey) = read_upload(multipart).await?;
    let well = compute(&config, &survey)?;
    let report = ReportExporter::new(config.report_options()).render(&well.trajectory, &well.report_header());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}_inclination.dat\"", well.name),
            ),
        ],
        report,
    )
        .into_response())
}

/// Pulls the `survey` table and optional `config` TOML out of the form
async fn read_upload(mut multipart: Multipart) -> Result<(WellConfig, Vec<u8>), ApiError> {
    let mut survey: Option<Vec<u8>> = None;
    let mut config: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "survey" => {
                survey = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
            }
            "config" => {
                config = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let survey = survey.ok_or_else(|| bad_request("Missing survey file".to_string()))?;
    let config = match config {
        Some(text) => WellConfig::from_toml_str(&text).map_err(into_api_error)?,
        None => WellConfig::default(),
    };

    Ok((config, survey))
}

fn compute(config: &WellConfig, survey: &[u8]) -> Result<WellRun, ApiError> {
    compute_well_from(config, survey).map_err(into_api_error)
}

fn into_api_error(error: Error) -> ApiError {
    let status = match &error {
        Error::Validation(_)
        | Error::EmptySurvey
        | Error::Csv(_)
        | Error::InvalidFormat(_)
        | Error::Config(_)
        | Error::Toml(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
        Error::Io(_) | Error::Json(_) | Error::Projection(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(%status, error = %error, "trajectory request rejected");

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

fn multipart_error(error: MultipartError) -> ApiError {
    bad_request(format!("Malformed upload: {}", error))
}

fn bad_request(error: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}
