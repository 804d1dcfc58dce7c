//! `/weather` route — one-shot forecast lookup for the call-sheet form.
//!
//! The form fetches a snapshot once per location+date and stores the result on
//! the call sheet; the document renderers only ever read that stored snapshot.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    errors::{AppError, AppResult},
    services::weather::{fetch_daily_forecast, WeatherSnapshotDto},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/weather", get(lookup_weather))
}

#[derive(Deserialize)]
struct WeatherQuery {
    location: Option<String>,
    /// ISO date (YYYY-MM-DD).
    date: Option<String>,
}

async fn lookup_weather(
    State(state): State<AppState>,
    Query(q): Query<WeatherQuery>,
) -> AppResult<Json<WeatherSnapshotDto>> {
    let location = q
        .location
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("location parameter is required".into()))?;
    let date = q
        .date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("date parameter is required".into()))?;

    let snapshot = fetch_daily_forecast(&state.config, location, date).await?;
    Ok(Json(snapshot))
}
