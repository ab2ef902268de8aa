use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ScoreRecord, Submission};

pub struct ScoreRecordRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRecordRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<ScoreRecord>> {
        let records = sqlx::query_as::<_, ScoreRecord>(
            r#"
            SELECT * FROM score_records
            WHERE student_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    pub async fn find_for_submission(&self, submission_id: Uuid) -> Result<Option<ScoreRecord>> {
        let record = sqlx::query_as::<_, ScoreRecord>(
            "SELECT * FROM score_records WHERE submission_id = $1",
        )
        .bind(submission_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }
}

pub async fn insert(
    conn: &mut PgConnection,
    submission: &Submission,
    score: Decimal,
) -> Result<ScoreRecord> {
    let record = sqlx::query_as::<_, ScoreRecord>(
        r#"
        INSERT INTO score_records (submission_id, student_id, score_group, score)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(submission.submission_id)
    .bind(submission.student_id)
    .bind(submission.category.group().as_str())
    .bind(score)
    .fetch_one(conn)
    .await?;

    Ok(record)
}

pub async fn delete_for_submission(conn: &mut PgConnection, submission_id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM score_records WHERE submission_id = $1")
        .bind(submission_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
