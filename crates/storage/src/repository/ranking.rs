use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::ranking::{RankingEntry, RankingFilter};
use crate::error::Result;
use crate::models::{Role, SubmissionStatus};

pub struct RankingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RankingRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Students ranked by total score within the filtered cohort
    pub async fn get_ranking(&self, filter: &RankingFilter) -> Result<(Vec<RankingEntry>, i64)> {
        let pagination = filter.pagination();

        let total_items = self.count_students(filter).await?;

        let mut query = QueryBuilder::new(
            r#"
            WITH ranked_students AS (
                SELECT
                    u.user_id AS student_id,
                    u.full_name,
                    u.student_number,
                    u.major,
                    u.grade,
                    u.class_name,
                    u.total_score,
                    (
                        SELECT COUNT(*) FROM submissions s
                        WHERE s.student_id = u.user_id AND s.status =
            "#,
        );
        query.push_bind(SubmissionStatus::Approved.as_str());
        query.push(
            r#"
                    ) AS approved_count,
                    RANK() OVER (ORDER BY u.total_score DESC) AS rank
                FROM users u
                WHERE u.role =
            "#,
        );
        query.push_bind(Role::Student.as_str());
        push_cohort_filters(&mut query, filter);
        query.push(
            r#"
            )
            SELECT * FROM ranked_students
            ORDER BY rank, student_number
            LIMIT
            "#,
        );
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let entries = query
            .build_query_as::<RankingEntry>()
            .fetch_all(self.pool)
            .await?;

        Ok((entries, total_items))
    }

    /// Rank of one student among all students, `None` if not a student
    pub async fn student_rank(&self, student_id: Uuid) -> Result<Option<i64>> {
        let rank = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT rank FROM (
                SELECT user_id, RANK() OVER (ORDER BY total_score DESC) AS rank
                FROM users
                WHERE role = $2
            ) ranked
            WHERE user_id = $1
            "#,
        )
        .bind(student_id)
        .bind(Role::Student.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(rank)
    }

    async fn count_students(&self, filter: &RankingFilter) -> Result<i64> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM users u WHERE u.role = ");
        query.push_bind(Role::Student.as_str());
        push_cohort_filters(&mut query, filter);

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

fn push_cohort_filters<'q>(query: &mut QueryBuilder<'q, Postgres>, filter: &'q RankingFilter) {
    if let Some(ref major) = filter.major {
        query.push(" AND u.major = ");
        query.push_bind(major);
    }

    if let Some(ref grade) = filter.grade {
        query.push(" AND u.grade = ");
        query.push_bind(grade);
    }

    if let Some(ref class_name) = filter.class_name {
        query.push(" AND u.class_name = ");
        query.push_bind(class_name);
    }
}
