use sqlx::PgPool;
use storage::{
    dto::clause::{CreateClauseRequest, UpdateClauseRequest},
    error::Result,
    models::ScoreClause,
    repository::clause::ClauseRepository,
};

/// List all score clauses
pub async fn list_clauses(pool: &PgPool) -> Result<Vec<ScoreClause>> {
    let repo = ClauseRepository::new(pool);
    repo.list().await
}

/// Create a new score clause
pub async fn create_clause(pool: &PgPool, request: &CreateClauseRequest) -> Result<ScoreClause> {
    let repo = ClauseRepository::new(pool);
    repo.create(request).await
}

/// Update a score clause
pub async fn update_clause(
    pool: &PgPool,
    clause_id: i32,
    request: &UpdateClauseRequest,
) -> Result<ScoreClause> {
    let repo = ClauseRepository::new(pool);

    let existing = repo.find_by_id(clause_id).await?;
    repo.update(&existing, request).await
}

/// Delete a score clause
pub async fn delete_clause(pool: &PgPool, clause_id: i32) -> Result<()> {
    let repo = ClauseRepository::new(pool);
    repo.delete(clause_id).await
}
