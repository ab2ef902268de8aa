use sqlx::PgPool;
use storage::{
    dto::submission::{CreateSubmissionRequest, SubmissionFilter, UpdateSubmissionRequest},
    error::{Result, StorageError},
    models::{Submission, User},
    repository::submission::{SubmissionContent, SubmissionRepository},
    services::{
        review, scoring,
        workflow::{self, Actor, Transition},
    },
};
use uuid::Uuid;

/// List submissions visible to `user`: their own, or everyone's for reviewers
pub async fn list_submissions(
    pool: &PgPool,
    user: &User,
    filter: &SubmissionFilter,
) -> Result<(Vec<Submission>, i64)> {
    let repo = SubmissionRepository::new(pool);
    let scope = (!user.is_reviewer()).then_some(user.user_id);
    repo.list(filter, scope).await
}

/// Get a submission by ID
pub async fn get_submission(pool: &PgPool, user: &User, submission_id: Uuid) -> Result<Submission> {
    let repo = SubmissionRepository::new(pool);
    let submission = repo.find_by_id(submission_id).await?;

    if !user.is_reviewer() && submission.student_id != user.user_id {
        return Err(StorageError::Forbidden(
            "You can only view your own submissions".to_string(),
        ));
    }

    Ok(submission)
}

/// Create a pending submission scored by the engine
pub async fn create_submission(
    pool: &PgPool,
    student: &User,
    request: &CreateSubmissionRequest,
) -> Result<Submission> {
    let repo = SubmissionRepository::new(pool);
    let suggested_score = scoring::score(&request.attributes);

    let submission = repo
        .create(student.user_id, request, suggested_score)
        .await?;

    tracing::info!(
        submission_id = %submission.submission_id,
        student_id = %student.user_id,
        category = submission.category.as_str(),
        %suggested_score,
        "Submission created"
    );

    Ok(submission)
}

/// Edit a pending submission
pub async fn update_submission(
    pool: &PgPool,
    actor: &Actor,
    submission_id: Uuid,
    request: &UpdateSubmissionRequest,
) -> Result<Submission> {
    let repo = SubmissionRepository::new(pool);

    let existing = repo.find_by_id(submission_id).await?;
    workflow::ensure_editable(&existing, actor)?;

    let content = merge_content(existing, request);
    repo.update_content(submission_id, &content).await
}

/// Delete a pending or withdrawn submission
pub async fn delete_submission(pool: &PgPool, actor: &Actor, submission_id: Uuid) -> Result<()> {
    let repo = SubmissionRepository::new(pool);

    let existing = repo.find_by_id(submission_id).await?;
    workflow::ensure_deletable(&existing, actor)?;

    repo.delete(submission_id).await
}

/// Run a review or withdrawal transition
pub async fn transition_submission(
    pool: &PgPool,
    actor: &Actor,
    submission_id: Uuid,
    transition: Transition,
) -> Result<Submission> {
    review::transition(pool, submission_id, actor, transition).await
}

fn merge_content(existing: Submission, request: &UpdateSubmissionRequest) -> SubmissionContent {
    let attributes = request
        .attributes
        .clone()
        .unwrap_or(existing.attributes.0);

    SubmissionContent {
        suggested_score: scoring::score(&attributes),
        attributes,
        description: request
            .description
            .clone()
            .unwrap_or(existing.description),
        proof_url: request.proof_url.clone().unwrap_or(existing.proof_url),
        self_score: request.self_score.unwrap_or(existing.self_score),
    }
}
