use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        ranking::{RankingEntry, RankingFilter},
    },
};

use crate::error::WebError;
use crate::extract::ApiQuery;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rankings",
    params(RankingFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Ranking retrieved successfully", body = PaginatedResponse<RankingEntry>),
        (status = 400, description = "Invalid query parameters"),
        (status = 403, description = "Caller is not a reviewer")
    ),
    tag = "rankings"
)]
pub async fn get_ranking(
    State(db): State<Database>,
    ApiQuery(filter): ApiQuery<RankingFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (entries, total_items) = services::get_ranking(db.pool(), &filter).await?;

    let response = PaginatedResponse::new(entries, &filter.pagination(), total_items);

    Ok(Json(response).into_response())
}
