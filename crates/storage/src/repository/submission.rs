use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use crate::dto::submission::{CreateSubmissionRequest, SubmissionFilter};
use crate::error::{Result, StorageError};
use crate::models::{Achievement, Submission, SubmissionStatus};
use crate::services::workflow::ReviewState;

/// Content fields of a submission owned by the student.
#[derive(Debug, Clone)]
pub struct SubmissionContent {
    pub attributes: Achievement,
    pub description: String,
    pub proof_url: String,
    pub self_score: Decimal,
    pub suggested_score: Decimal,
}

pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        student_id: Uuid,
        req: &CreateSubmissionRequest,
        suggested_score: Decimal,
    ) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (
                student_id, category, attributes, description, proof_url,
                self_score, suggested_score, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(req.attributes.category().as_str())
        .bind(Json(&req.attributes))
        .bind(&req.description)
        .bind(&req.proof_url)
        .bind(req.self_score)
        .bind(suggested_score)
        .bind(SubmissionStatus::Pending.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(submission)
    }

    pub async fn find_by_id(&self, submission_id: Uuid) -> Result<Submission> {
        sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE submission_id = $1")
            .bind(submission_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Filtered, paginated listing, newest first. `student_scope` restricts the
    /// listing to one student regardless of the filter.
    pub async fn list(
        &self,
        filter: &SubmissionFilter,
        student_scope: Option<Uuid>,
    ) -> Result<(Vec<Submission>, i64)> {
        let student_id = student_scope.or(filter.student_id);
        let pagination = filter.pagination();

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM submissions WHERE 1=1");
        push_filters(&mut count_query, filter, student_id);
        let total_items = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new("SELECT * FROM submissions WHERE 1=1");
        push_filters(&mut query, filter, student_id);
        query.push(" ORDER BY created_at DESC LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let submissions = query
            .build_query_as::<Submission>()
            .fetch_all(self.pool)
            .await?;

        Ok((submissions, total_items))
    }

    pub async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE student_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }

    /// Newest first: pending submissions by creation time, reviewed ones by
    /// their last update.
    pub async fn list_by_status(&self, status: SubmissionStatus) -> Result<Vec<Submission>> {
        let order = match status {
            SubmissionStatus::Pending => "created_at",
            _ => "updated_at",
        };

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM submissions WHERE status = ");
        query.push_bind(status.as_str());
        query.push(" ORDER BY ");
        query.push(order);
        query.push(" DESC");

        let submissions = query
            .build_query_as::<Submission>()
            .fetch_all(self.pool)
            .await?;

        Ok(submissions)
    }

    pub async fn count_by_status(&self, status: SubmissionStatus) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submissions WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    pub async fn update_content(
        &self,
        submission_id: Uuid,
        content: &SubmissionContent,
    ) -> Result<Submission> {
        sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET category = $2,
                attributes = $3,
                description = $4,
                proof_url = $5,
                self_score = $6,
                suggested_score = $7,
                updated_at = CURRENT_TIMESTAMP
            WHERE submission_id = $1 AND status = $8
            RETURNING *
            "#,
        )
        .bind(submission_id)
        .bind(content.attributes.category().as_str())
        .bind(Json(&content.attributes))
        .bind(&content.description)
        .bind(&content.proof_url)
        .bind(content.self_score)
        .bind(content.suggested_score)
        .bind(SubmissionStatus::Pending.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| {
            StorageError::ConstraintViolation("Submission is no longer pending".to_string())
        })
    }

    pub async fn delete(&self, submission_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM submissions WHERE submission_id = $1 AND status IN ($2, $3)",
        )
        .bind(submission_id)
        .bind(SubmissionStatus::Pending.as_str())
        .bind(SubmissionStatus::Revoked.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_filters(
    query: &mut QueryBuilder<'_, Postgres>,
    filter: &SubmissionFilter,
    student_id: Option<Uuid>,
) {
    if let Some(student_id) = student_id {
        query.push(" AND student_id = ");
        query.push_bind(student_id);
    }

    if let Some(status) = filter.status {
        query.push(" AND status = ");
        query.push_bind(status.as_str());
    }

    if let Some(category) = filter.category {
        query.push(" AND category = ");
        query.push_bind(category.as_str());
    }
}

/// Load a submission and lock its row for the rest of the transaction
pub async fn lock_for_update(conn: &mut PgConnection, submission_id: Uuid) -> Result<Submission> {
    sqlx::query_as::<_, Submission>(
        "SELECT * FROM submissions WHERE submission_id = $1 FOR UPDATE",
    )
    .bind(submission_id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)
}

/// Write the review fields produced by a workflow transition
pub async fn save_review_state(
    conn: &mut PgConnection,
    submission_id: Uuid,
    state: &ReviewState,
) -> Result<Submission> {
    sqlx::query_as::<_, Submission>(
        r#"
        UPDATE submissions
        SET status = $2,
            approved_score = $3,
            reject_reason = $4,
            reviewer_id = $5,
            reviewed_at = $6,
            updated_at = CURRENT_TIMESTAMP
        WHERE submission_id = $1
        RETURNING *
        "#,
    )
    .bind(submission_id)
    .bind(state.status.as_str())
    .bind(state.approved_score)
    .bind(&state.reject_reason)
    .bind(state.reviewer_id)
    .bind(state.reviewed_at)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)
}
