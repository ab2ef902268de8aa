use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::user::{StudentDashboardResponse, UpdateProfileRequest, UserResponse},
    models::ProfileChangeLog,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::ApiJson;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The calling user", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "me"
)]
pub async fn get_me(Extension(current): Extension<CurrentUser>) -> Result<Response, WebError> {
    Ok(Json(UserResponse::from(current.0)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/me",
    request_body = UpdateProfileRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "me"
)]
pub async fn update_me(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_own_profile(db.pool(), &current.0, &req).await?;

    Ok(Json(UserResponse::from(updated)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/me/dashboard",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submissions, scores and rank of the calling student", body = StudentDashboardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a student")
    ),
    tag = "me"
)]
pub async fn get_my_dashboard(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    let student = current.ensure_student()?.clone();

    let dashboard = services::get_dashboard(db.pool(), student).await?;

    Ok(Json(dashboard).into_response())
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Student found", body = UserResponse),
        (status = 403, description = "Caller is not a reviewer"),
        (status = 404, description = "Student not found")
    ),
    tag = "students"
)]
pub async fn get_student(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let student = services::get_student(db.pool(), id).await?;

    Ok(Json(UserResponse::from(student)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    request_body = UpdateProfileRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Student updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller is not a reviewer"),
        (status = 404, description = "Student not found")
    ),
    tag = "students"
)]
pub async fn update_student(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_student(db.pool(), id, &current.0, &req).await?;

    Ok(Json(UserResponse::from(updated)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/change-log",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile edits, newest first", body = Vec<ProfileChangeLog>),
        (status = 403, description = "Caller is not a reviewer"),
        (status = 404, description = "Student not found")
    ),
    tag = "students"
)]
pub async fn get_student_change_log(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let logs = services::get_change_log(db.pool(), id).await?;

    Ok(Json(logs).into_response())
}
