use sqlx::PgPool;
use storage::{
    dto::submission::{ReviewDashboardResponse, SubmissionResponse},
    error::Result,
    models::SubmissionStatus,
    repository::submission::SubmissionRepository,
};

/// Submissions grouped by review status
pub async fn get_dashboard(pool: &PgPool) -> Result<ReviewDashboardResponse> {
    let repo = SubmissionRepository::new(pool);

    let pending = repo.list_by_status(SubmissionStatus::Pending).await?;
    let approved = repo.list_by_status(SubmissionStatus::Approved).await?;
    let rejected = repo.list_by_status(SubmissionStatus::Rejected).await?;

    Ok(ReviewDashboardResponse {
        pending: pending.into_iter().map(SubmissionResponse::from).collect(),
        approved: approved.into_iter().map(SubmissionResponse::from).collect(),
        rejected: rejected.into_iter().map(SubmissionResponse::from).collect(),
    })
}
