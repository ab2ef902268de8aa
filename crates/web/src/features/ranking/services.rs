use sqlx::PgPool;
use storage::{
    dto::ranking::{RankingEntry, RankingFilter},
    error::Result,
    repository::ranking::RankingRepository,
};

/// Get the student ranking with cohort filters and pagination
pub async fn get_ranking(pool: &PgPool, filter: &RankingFilter) -> Result<(Vec<RankingEntry>, i64)> {
    let repo = RankingRepository::new(pool);
    repo.get_ranking(filter).await
}
