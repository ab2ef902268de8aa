use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::submission::ReviewDashboardResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/reviews/dashboard",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pending, approved and rejected submissions", body = ReviewDashboardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a reviewer")
    ),
    tag = "reviews"
)]
pub async fn get_review_dashboard(State(db): State<Database>) -> Result<Response, WebError> {
    let dashboard = services::get_dashboard(db.pool()).await?;

    Ok(Json(dashboard).into_response())
}
