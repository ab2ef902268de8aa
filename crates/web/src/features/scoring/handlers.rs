use axum::{
    Json,
    response::{IntoResponse, Response},
};
use storage::dto::scoring::{ScorePreviewRequest, ScorePreviewResponse};

use crate::error::WebError;
use crate::extract::ApiJson;

#[utoipa::path(
    post,
    path = "/api/scoring/preview",
    request_body = ScorePreviewRequest,
    responses(
        (status = 200, description = "Score the engine would suggest for these attributes", body = ScorePreviewResponse),
        (status = 422, description = "Malformed attributes")
    ),
    tag = "scoring"
)]
pub async fn preview_score(ApiJson(req): ApiJson<ScorePreviewRequest>) -> Result<Response, WebError> {
    let preview = ScorePreviewResponse::from(&req.attributes);

    tracing::debug!(
        category = preview.category.as_str(),
        score = %preview.score,
        "Score preview computed"
    );

    Ok(Json(preview).into_response())
}
