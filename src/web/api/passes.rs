use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{parse_duration, window_length};
use crate::inputs::Inputs;
use crate::pass::QualifiedPass;
use crate::predict::Window;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PassesQuery {
    /// Look-ahead from now, e.g. `8h` or `90m`. Defaults to the configured window.
    pub window: Option<String>,
    /// Event detection threshold in degrees. Defaults to the configured value.
    pub min_elevation: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PassesResponse {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub passes: Vec<QualifiedPass>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PairSummary {
    pub satellite: String,
    pub frequency_mhz: f64,
    pub station: String,
}

#[utoipa::path(
    get,
    path = "/api/passes",
    tag = "passes",
    params(PassesQuery),
    responses(
        (status = 200, description = "Qualified passes ordered by rise time", body = PassesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Catalog could not be loaded", body = ErrorResponse)
    )
)]
pub async fn list_passes(
    State(state): State<AppState>,
    Query(query): Query<PassesQuery>,
) -> ApiResult<impl IntoResponse> {
    let length = match query.window.as_deref() {
        Some(text) => query_window_length(text)?,
        None => state
            .config
            .window_duration()
            .map_err(|e| ApiError::Internal(e.to_string()))?,
    };
    let min_elevation = match query.min_elevation {
        Some(deg) if !(-90.0..=90.0).contains(&deg) => {
            return Err(ApiError::Validation(format!(
                "min_elevation {deg} is not an elevation"
            )));
        }
        Some(deg) => deg,
        None => state.config.min_elevation_deg,
    };

    let window =
        Window::starting_now(length).map_err(|e| ApiError::Validation(e.to_string()))?;
    let config = state.config.clone();
    let passes = tokio::task::spawn_blocking(move || {
        let inputs = Inputs::load(&config)?;
        Ok::<_, ApiError>(inputs.passes(&config, &window, min_elevation))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok((
        StatusCode::OK,
        Json(PassesResponse {
            window_start: window.start,
            window_end: window.end,
            passes,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/pairs",
    tag = "passes",
    responses(
        (status = 200, description = "Satellites paired with the stations that receive them", body = Vec<PairSummary>),
        (status = 500, description = "Catalog could not be loaded", body = ErrorResponse)
    )
)]
pub async fn list_pairs(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let config = state.config.clone();
    let pairs = tokio::task::spawn_blocking(move || {
        let inputs = Inputs::load(&config)?;
        let pairs: Vec<PairSummary> = inputs
            .pairs()
            .iter()
            .map(|pair| PairSummary {
                satellite: pair.satellite.name.clone(),
                frequency_mhz: pair.satellite.frequency_mhz,
                station: pair.station.name.clone(),
            })
            .collect();
        Ok::<_, ApiError>(pairs)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok((StatusCode::OK, Json(pairs)))
}

fn query_window_length(text: &str) -> ApiResult<Duration> {
    parse_duration(text)
        .and_then(window_length)
        .map_err(|e| ApiError::Validation(format!("window: {e}")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;

    #[test]
    fn test_query_window_length() {
        assert_eq!(query_window_length("90m").unwrap(), Duration::minutes(90));
        assert_eq!(query_window_length(" 8h ").unwrap(), Duration::hours(8));
        for text in ["0s", "later", "31days", "1000000years"] {
            assert!(
                matches!(query_window_length(text), Err(ApiError::Validation(_))),
                "{text}"
            );
        }
    }

    #[tokio::test]
    async fn test_huge_window_is_a_bad_request() {
        let state = AppState {
            config: Arc::new(Config::default()),
        };
        let query = PassesQuery {
            window: Some("1000000years".into()),
            min_elevation: None,
        };
        let result = list_passes(State(state), Query(query)).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_out_of_range_elevation_is_rejected() {
        let state = AppState {
            config: Arc::new(Config::default()),
        };
        let query = PassesQuery {
            window: None,
            min_elevation: Some(95.0),
        };
        let result = list_passes(State(state), Query(query)).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_catalog_is_a_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState {
            config: Arc::new(Config {
                satellites: dir.path().join("satellite.txt"),
                ..Config::default()
            }),
        };
        let result = list_pairs(State(state)).await;
        assert!(matches!(result, Err(ApiError::Catalog(_))));
    }
}
