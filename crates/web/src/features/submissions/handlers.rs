use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        submission::{
            ApproveSubmissionRequest, CreateSubmissionRequest, RejectSubmissionRequest,
            SubmissionFilter, SubmissionResponse, UpdateSubmissionRequest,
        },
    },
    services::workflow::Transition,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/submissions",
    params(SubmissionFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submissions visible to the caller", body = PaginatedResponse<SubmissionResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    ApiQuery(filter): ApiQuery<SubmissionFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (submissions, total_items) =
        services::list_submissions(db.pool(), &current.0, &filter).await?;

    let response = PaginatedResponse::new(submissions, &filter.pagination(), total_items)
        .map(SubmissionResponse::from);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = CreateSubmissionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Submission created", body = SubmissionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a student")
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(req): ApiJson<CreateSubmissionRequest>,
) -> Result<Response, WebError> {
    let student = current.ensure_student()?;
    req.validate()?;

    let submission = services::create_submission(db.pool(), student, &req).await?;

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(submission))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/{id}",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submission found", body = SubmissionResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Submission not found")
    ),
    tag = "submissions"
)]
pub async fn get_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let submission = services::get_submission(db.pool(), &current.0, id).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/submissions/{id}",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = UpdateSubmissionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submission updated", body = SubmissionResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Submission not found"),
        (status = 409, description = "Submission is no longer pending")
    ),
    tag = "submissions"
)]
pub async fn update_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateSubmissionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_submission(db.pool(), &current.actor(), id, &req).await?;

    Ok(Json(SubmissionResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/submissions/{id}",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Submission deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Submission not found"),
        (status = 409, description = "Submission has been reviewed")
    ),
    tag = "submissions"
)]
pub async fn delete_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_submission(db.pool(), &current.actor(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions/{id}/withdraw",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submission withdrawn", body = SubmissionResponse),
        (status = 403, description = "Not the owner"),
        (status = 409, description = "Submission is not pending")
    ),
    tag = "submissions"
)]
pub async fn withdraw_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let submission =
        services::transition_submission(db.pool(), &current.actor(), id, Transition::Withdraw)
            .await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = ApproveSubmissionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submission approved", body = SubmissionResponse),
        (status = 400, description = "Missing or out of range score"),
        (status = 403, description = "Caller is not a reviewer"),
        (status = 409, description = "Submission is not pending")
    ),
    tag = "submissions"
)]
pub async fn approve_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<ApproveSubmissionRequest>,
) -> Result<Response, WebError> {
    let transition = Transition::Approve {
        score: req.approved_score,
    };
    let submission =
        services::transition_submission(db.pool(), &current.actor(), id, transition).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions/{id}/reject",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = RejectSubmissionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submission rejected", body = SubmissionResponse),
        (status = 400, description = "Missing reject reason"),
        (status = 403, description = "Caller is not a reviewer"),
        (status = 409, description = "Submission is not pending")
    ),
    tag = "submissions"
)]
pub async fn reject_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<RejectSubmissionRequest>,
) -> Result<Response, WebError> {
    let transition = Transition::Reject { reason: req.reason };
    let submission =
        services::transition_submission(db.pool(), &current.actor(), id, transition).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions/{id}/revoke",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Review revoked, submission back to pending", body = SubmissionResponse),
        (status = 403, description = "Caller is not a reviewer"),
        (status = 409, description = "Submission has not been reviewed")
    ),
    tag = "submissions"
)]
pub async fn revoke_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let submission =
        services::transition_submission(db.pool(), &current.actor(), id, Transition::Revoke)
            .await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}
