use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::{PaginationParams, default_page, default_page_size};
use crate::models::{
    Achievement, AchievementCategory, ScoreGroup, Submission, SubmissionStatus,
};

/// Largest self-reported score accepted from a student.
const MAX_SELF_SCORE: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub submission_id: Uuid,
    pub student_id: Uuid,
    pub category: AchievementCategory,
    pub score_group: ScoreGroup,
    pub attributes: Achievement,
    pub description: String,
    pub proof_url: String,
    pub self_score: Decimal,
    pub suggested_score: Decimal,
    pub status: SubmissionStatus,
    pub approved_score: Option<Decimal>,
    pub reject_reason: Option<String>,
    pub reviewer_id: Option<Uuid>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            submission_id: submission.submission_id,
            student_id: submission.student_id,
            category: submission.category,
            score_group: submission.category.group(),
            attributes: submission.attributes.0,
            description: submission.description,
            proof_url: submission.proof_url,
            self_score: submission.self_score,
            suggested_score: submission.suggested_score,
            status: submission.status,
            approved_score: submission.approved_score,
            reject_reason: submission.reject_reason,
            reviewer_id: submission.reviewer_id,
            reviewed_at: submission.reviewed_at,
            created_at: submission.created_at,
            updated_at: submission.updated_at,
        }
    }
}

/// Request payload for submitting an achievement
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSubmissionRequest {
    #[validate(custom(function = "validate_attributes"))]
    pub attributes: Achievement,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Description must be between 1 and 200 characters"
    ))]
    pub description: String,

    /// Location of the uploaded proof (image or document).
    #[validate(length(min = 1, max = 500, message = "Proof file is required"))]
    pub proof_url: String,

    #[validate(custom(function = "validate_self_score"))]
    pub self_score: Decimal,
}

/// Request payload for editing a pending submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSubmissionRequest {
    #[validate(custom(function = "validate_attributes"))]
    pub attributes: Option<Achievement>,

    #[validate(length(min = 1, max = 200))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub proof_url: Option<String>,

    #[validate(custom(function = "validate_self_score"))]
    pub self_score: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ApproveSubmissionRequest {
    pub approved_score: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RejectSubmissionRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SubmissionFilter {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub status: Option<SubmissionStatus>,
    pub category: Option<AchievementCategory>,
    /// Ignored for students, who only ever see their own submissions.
    pub student_id: Option<Uuid>,
}

impl Default for SubmissionFilter {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            status: None,
            category: None,
            student_id: None,
        }
    }
}

impl SubmissionFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()
    }
}

/// Submissions grouped for the reviewer dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewDashboardResponse {
    pub pending: Vec<SubmissionResponse>,
    pub approved: Vec<SubmissionResponse>,
    pub rejected: Vec<SubmissionResponse>,
}

fn validate_attributes(attributes: &Achievement) -> Result<(), ValidationError> {
    match attributes {
        Achievement::Volunteer { hours, .. } if *hours < Decimal::ZERO => {
            Err(ValidationError::new("negative_hours")
                .with_message("Volunteer hours cannot be negative".into()))
        }
        Achievement::Cadre {
            supervisor_score, ..
        } if !(0..=100).contains(supervisor_score) => Err(ValidationError::new(
            "supervisor_score_range",
        )
        .with_message("Supervisor score must be between 0 and 100".into())),
        _ => Ok(()),
    }
}

fn validate_self_score(score: &Decimal) -> Result<(), ValidationError> {
    if *score < Decimal::ZERO || *score > Decimal::from(MAX_SELF_SCORE) {
        return Err(ValidationError::new("self_score_range")
            .with_message("Self score must be between 0 and 100".into()));
    }
    Ok(())
}
