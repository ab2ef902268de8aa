use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::ProfileChangeLog;
use crate::services::profile::FieldChange;

pub struct ChangeLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ChangeLogRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<ProfileChangeLog>> {
        let logs = sqlx::query_as::<_, ProfileChangeLog>(
            r#"
            SELECT * FROM profile_change_logs
            WHERE student_id = $1
            ORDER BY changed_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(self.pool)
        .await?;

        Ok(logs)
    }
}

pub async fn insert(
    conn: &mut PgConnection,
    student_id: Uuid,
    editor_id: Uuid,
    change: &FieldChange,
) -> Result<ProfileChangeLog> {
    let log = sqlx::query_as::<_, ProfileChangeLog>(
        r#"
        INSERT INTO profile_change_logs (student_id, editor_id, field_name, old_value, new_value)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(student_id)
    .bind(editor_id)
    .bind(change.field)
    .bind(&change.old_value)
    .bind(&change.new_value)
    .fetch_one(conn)
    .await?;

    Ok(log)
}
