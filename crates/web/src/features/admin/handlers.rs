use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        stats::RecomputeTotalsResponse,
        user::{CreateUserRequest, CreatedUserResponse, UserResponse},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::ApiJson;

use super::services;

#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Account created; the token is only shown once", body = CreatedUserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Username or identity number already taken")
    ),
    tag = "admin"
)]
pub async fn create_user(
    State(db): State<Database>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let (user, api_token) = services::create_user(db.pool(), &req).await?;

    let response = CreatedUserResponse {
        user: UserResponse::from(user),
        api_token,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/recompute-totals",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Cached totals rewritten from score records", body = RecomputeTotalsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn recompute_totals(State(db): State<Database>) -> Result<Response, WebError> {
    let students_updated = services::recompute_totals(db.pool()).await?;

    Ok(Json(RecomputeTotalsResponse { students_updated }).into_response())
}
