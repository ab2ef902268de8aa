use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::clause::{CreateClauseRequest, UpdateClauseRequest},
    models::ScoreClause,
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::ApiJson;

use super::services;

#[utoipa::path(
    get,
    path = "/api/clauses",
    responses(
        (status = 200, description = "Score clauses ordered by category", body = Vec<ScoreClause>)
    ),
    tag = "clauses"
)]
pub async fn list_clauses(State(db): State<Database>) -> Result<Response, WebError> {
    let clauses = services::list_clauses(db.pool()).await?;

    Ok(Json(clauses).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/clauses",
    request_body = CreateClauseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Clause created", body = ScoreClause),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn create_clause(
    State(db): State<Database>,
    ApiJson(req): ApiJson<CreateClauseRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let clause = services::create_clause(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(clause)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/admin/clauses/{id}",
    params(
        ("id" = i32, Path, description = "Clause ID")
    ),
    request_body = UpdateClauseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Clause updated", body = ScoreClause),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Clause not found")
    ),
    tag = "admin"
)]
pub async fn update_clause(
    State(db): State<Database>,
    Path(id): Path<i32>,
    ApiJson(req): ApiJson<UpdateClauseRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let clause = services::update_clause(db.pool(), id, &req).await?;

    Ok(Json(clause).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/admin/clauses/{id}",
    params(
        ("id" = i32, Path, description = "Clause ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Clause deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Clause not found")
    ),
    tag = "admin"
)]
pub async fn delete_clause(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> Result<Response, WebError> {
    services::delete_clause(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
