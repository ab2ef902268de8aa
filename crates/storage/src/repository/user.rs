use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::user::CreateUserRequest;
use crate::error::{Result, StorageError};
use crate::models::{Role, User};

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an account with the given API token
    pub async fn create(&self, req: &CreateUserRequest, api_token: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                username, role, full_name, student_number, staff_number, major, grade,
                class_name, department, email, phone, rank_visible, api_token
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&req.username)
        .bind(req.role.as_str())
        .bind(&req.full_name)
        .bind(&req.student_number)
        .bind(&req.staff_number)
        .bind(&req.major)
        .bind(&req.grade)
        .bind(&req.class_name)
        .bind(&req.department)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(req.rank_visible)
        .bind(api_token)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e)
                .on_unique_violation("Username, student number or staff number already exists")
        })?;

        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Find a user that must be a student
    pub async fn find_student(&self, user_id: Uuid) -> Result<User> {
        let user = self.find_by_id(user_id).await?;
        if user.is_student() {
            Ok(user)
        } else {
            Err(StorageError::NotFound)
        }
    }

    pub async fn find_by_token(&self, api_token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE api_token = $1")
            .bind(api_token)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    pub async fn count_students(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(Role::Student.as_str())
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Rewrite `total_score` of every student from their score records
    pub async fn refresh_all_total_scores(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users u
            SET total_score = COALESCE(
                (SELECT SUM(sr.score) FROM score_records sr WHERE sr.student_id = u.user_id),
                0
            )
            WHERE u.role = $1
            "#,
        )
        .bind(Role::Student.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Lock a user row for the rest of the transaction
pub async fn lock_for_update(conn: &mut PgConnection, user_id: Uuid) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(conn)
        .await?
        .ok_or(StorageError::NotFound)
}

/// Persist the editable profile columns of `user`
pub async fn save_profile(conn: &mut PgConnection, user: &User) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET full_name = $2,
            major = $3,
            grade = $4,
            class_name = $5,
            department = $6,
            email = $7,
            phone = $8,
            rank_visible = $9,
            updated_at = CURRENT_TIMESTAMP
        WHERE user_id = $1
        RETURNING *
        "#,
    )
    .bind(user.user_id)
    .bind(&user.full_name)
    .bind(&user.major)
    .bind(&user.grade)
    .bind(&user.class_name)
    .bind(&user.department)
    .bind(&user.email)
    .bind(&user.phone)
    .bind(user.rank_visible)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)
}

/// Recompute a student's cached total as the sum of their score records
pub async fn refresh_total_score(conn: &mut PgConnection, student_id: Uuid) -> Result<Decimal> {
    let total = sqlx::query_scalar::<_, Decimal>(
        r#"
        UPDATE users
        SET total_score = COALESCE(
            (SELECT SUM(score) FROM score_records WHERE student_id = $1),
            0
        )
        WHERE user_id = $1
        RETURNING total_score
        "#,
    )
    .bind(student_id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(total)
}
