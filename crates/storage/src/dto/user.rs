use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::submission::SubmissionResponse;
use crate::models::{Role, ScoreRecord, User};
use crate::services::aggregation::ScoreTotals;

/// Public view of a user; never exposes the API token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub full_name: String,
    pub student_number: Option<String>,
    pub staff_number: Option<String>,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub class_name: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rank_visible: bool,
    pub total_score: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            role: user.role,
            full_name: user.full_name,
            student_number: user.student_number,
            staff_number: user.staff_number,
            major: user.major,
            grade: user.grade,
            class_name: user.class_name,
            department: user.department,
            email: user.email,
            phone: user.phone,
            rank_visible: user.rank_visible,
            total_score: user.total_score,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Request payload for creating an account (admin only)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_identity_numbers"))]
pub struct CreateUserRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Username must be between 1 and 150 characters"
    ))]
    pub username: String,

    pub role: Role,

    #[validate(length(min = 1, max = 100, message = "Full name is required"))]
    pub full_name: String,

    #[validate(length(min = 1, max = 20))]
    pub student_number: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub staff_number: Option<String>,

    #[validate(length(max = 50))]
    pub major: Option<String>,

    #[validate(length(max = 20))]
    pub grade: Option<String>,

    #[validate(length(max = 20))]
    pub class_name: Option<String>,

    #[validate(length(max = 50))]
    pub department: Option<String>,

    #[validate(email, length(max = 100))]
    pub email: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[serde(default)]
    pub rank_visible: bool,
}

/// Returned once, when the account is created
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedUserResponse {
    pub user: UserResponse,
    pub api_token: String,
}

/// Request payload for editing a profile; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,

    #[validate(length(max = 50))]
    pub major: Option<String>,

    #[validate(length(max = 20))]
    pub grade: Option<String>,

    #[validate(length(max = 20))]
    pub class_name: Option<String>,

    #[validate(length(max = 50))]
    pub department: Option<String>,

    #[validate(email, length(max = 100))]
    pub email: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    pub rank_visible: Option<bool>,
}

/// Everything a student sees on their home page
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDashboardResponse {
    pub student: UserResponse,
    pub submissions: Vec<SubmissionResponse>,
    pub score_records: Vec<ScoreRecord>,
    pub totals: ScoreTotals,
    /// Present only when the student opted in to seeing their rank.
    pub rank: Option<i64>,
}

fn validate_identity_numbers(req: &CreateUserRequest) -> Result<(), ValidationError> {
    match req.role {
        Role::Student if req.student_number.is_none() => Err(ValidationError::new(
            "student_number_required",
        )
        .with_message("Students need a student number".into())),
        Role::Teacher | Role::Admin if req.student_number.is_some() => Err(
            ValidationError::new("unexpected_student_number")
                .with_message("Only students have a student number".into()),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_request() -> CreateUserRequest {
        CreateUserRequest {
            username: "li.hua".to_string(),
            role: Role::Student,
            full_name: "Li Hua".to_string(),
            student_number: Some("2023001".to_string()),
            staff_number: None,
            major: Some("Computer Science".to_string()),
            grade: Some("2023".to_string()),
            class_name: Some("CS-2".to_string()),
            department: None,
            email: Some("li.hua@example.edu".to_string()),
            phone: None,
            rank_visible: false,
        }
    }

    #[test]
    fn test_student_request_is_valid() {
        assert!(student_request().validate().is_ok());
    }

    #[test]
    fn test_student_requires_student_number() {
        let mut req = student_request();
        req.student_number = None;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_teacher_cannot_have_student_number() {
        let mut req = student_request();
        req.role = Role::Teacher;
        assert!(req.validate().is_err());

        req.student_number = None;
        req.staff_number = Some("T1001".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let req = UpdateProfileRequest {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
