use sqlx::PgPool;

use crate::dto::clause::{CreateClauseRequest, UpdateClauseRequest};
use crate::error::{Result, StorageError};
use crate::models::ScoreClause;

/// Repository for the published scoring rulebook
pub struct ClauseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClauseRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ScoreClause>> {
        let clauses = sqlx::query_as::<_, ScoreClause>(
            "SELECT * FROM score_clauses ORDER BY category, sort_order, clause_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(clauses)
    }

    pub async fn find_by_id(&self, clause_id: i32) -> Result<ScoreClause> {
        sqlx::query_as::<_, ScoreClause>("SELECT * FROM score_clauses WHERE clause_id = $1")
            .bind(clause_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM score_clauses")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn create(&self, req: &CreateClauseRequest) -> Result<ScoreClause> {
        let clause = sqlx::query_as::<_, ScoreClause>(
            r#"
            INSERT INTO score_clauses (category, content, score_range, sort_order)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&req.category)
        .bind(&req.content)
        .bind(&req.score_range)
        .bind(req.sort_order)
        .fetch_one(self.pool)
        .await?;

        Ok(clause)
    }

    pub async fn update(
        &self,
        existing: &ScoreClause,
        req: &UpdateClauseRequest,
    ) -> Result<ScoreClause> {
        let category = req.category.as_ref().unwrap_or(&existing.category);
        let content = req.content.as_ref().unwrap_or(&existing.content);
        let score_range = req.score_range.as_ref().unwrap_or(&existing.score_range);
        let sort_order = req.sort_order.unwrap_or(existing.sort_order);

        sqlx::query_as::<_, ScoreClause>(
            r#"
            UPDATE score_clauses
            SET category = $2, content = $3, score_range = $4, sort_order = $5
            WHERE clause_id = $1
            RETURNING *
            "#,
        )
        .bind(existing.clause_id)
        .bind(category)
        .bind(content)
        .bind(score_range)
        .bind(sort_order)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, clause_id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM score_clauses WHERE clause_id = $1")
            .bind(clause_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
