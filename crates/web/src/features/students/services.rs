use sqlx::PgPool;
use storage::{
    dto::{
        submission::SubmissionResponse,
        user::{StudentDashboardResponse, UpdateProfileRequest, UserResponse},
    },
    error::Result,
    models::{ProfileChangeLog, User},
    repository::{
        change_log::ChangeLogRepository, ranking::RankingRepository,
        score_record::ScoreRecordRepository, submission::SubmissionRepository,
        user::UserRepository,
    },
    services::{aggregation, profile},
};
use uuid::Uuid;

/// Build the dashboard of a student
pub async fn get_dashboard(pool: &PgPool, student: User) -> Result<StudentDashboardResponse> {
    let submissions = SubmissionRepository::new(pool)
        .list_for_student(student.user_id)
        .await?;
    let score_records = ScoreRecordRepository::new(pool)
        .list_for_student(student.user_id)
        .await?;
    let totals = aggregation::summarize(&score_records);

    let rank = if student.rank_visible {
        RankingRepository::new(pool)
            .student_rank(student.user_id)
            .await?
    } else {
        None
    };

    Ok(StudentDashboardResponse {
        student: UserResponse::from(student),
        submissions: submissions
            .into_iter()
            .map(SubmissionResponse::from)
            .collect(),
        score_records,
        totals,
        rank,
    })
}

/// Get a student by ID
pub async fn get_student(pool: &PgPool, student_id: Uuid) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.find_student(student_id).await
}

/// Update a user's own profile
pub async fn update_own_profile(
    pool: &PgPool,
    user: &User,
    request: &UpdateProfileRequest,
) -> Result<User> {
    profile::update_profile(pool, user.user_id, user.user_id, request).await
}

/// Update a student's profile on their behalf
pub async fn update_student(
    pool: &PgPool,
    student_id: Uuid,
    editor: &User,
    request: &UpdateProfileRequest,
) -> Result<User> {
    let student = get_student(pool, student_id).await?;
    profile::update_profile(pool, student.user_id, editor.user_id, request).await
}

/// Profile edits of a student, newest first
pub async fn get_change_log(pool: &PgPool, student_id: Uuid) -> Result<Vec<ProfileChangeLog>> {
    let student = get_student(pool, student_id).await?;
    let repo = ChangeLogRepository::new(pool);
    repo.list_for_student(student.user_id).await
}
