use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::stats::StatsResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Student, pending submission and clause counts", body = StatsResponse)
    ),
    tag = "stats"
)]
pub async fn get_stats(State(db): State<Database>) -> Result<Response, WebError> {
    let stats = services::get_stats(db.pool()).await?;

    Ok(Json(stats).into_response())
}
