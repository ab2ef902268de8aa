use sqlx::PgPool;
use storage::{
    dto::stats::StatsResponse,
    error::Result,
    models::SubmissionStatus,
    repository::{clause::ClauseRepository, submission::SubmissionRepository, user::UserRepository},
};

/// Headline counters for the landing page
pub async fn get_stats(pool: &PgPool) -> Result<StatsResponse> {
    let total_students = UserRepository::new(pool).count_students().await?;
    let pending_submissions = SubmissionRepository::new(pool)
        .count_by_status(SubmissionStatus::Pending)
        .await?;
    let total_clauses = ClauseRepository::new(pool).count().await?;

    Ok(StatsResponse {
        total_students,
        pending_submissions,
        total_clauses,
    })
}
