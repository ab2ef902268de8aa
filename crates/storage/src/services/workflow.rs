//! Submission lifecycle.
//!
//! ```text
//!            approve            revoke
//! pending ─────────────► approved ─────► pending
//!    │  └──── reject ──► rejected ─────► pending
//!    └──── withdraw ───► revoked
//! ```
//!
//! Transitions are computed here without touching the database; the review
//! service persists the resulting [`Outcome`] in a single transaction.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Role, Submission, SubmissionStatus};

/// The user performing a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    fn owns(&self, submission: &Submission) -> bool {
        self.user_id == submission.student_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Approve { score: Option<Decimal> },
    Reject { reason: Option<String> },
    /// Reviewer sends an approved or rejected submission back to pending.
    Revoke,
    /// Student pulls back their own pending submission.
    Withdraw,
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Approve { .. } => "approve",
            Self::Reject { .. } => "reject",
            Self::Revoke => "revoke",
            Self::Withdraw => "withdraw",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Only teachers and admins can review submissions")]
    NotReviewer,

    #[error("Only the submitting student can perform this action")]
    NotOwner,

    #[error("Only pending submissions can be reviewed (current status: {})", .0.as_str())]
    NotPending(SubmissionStatus),

    #[error("Only approved or rejected submissions can be revoked (current status: {})", .0.as_str())]
    NotReviewed(SubmissionStatus),

    #[error("Submission can no longer be modified (current status: {})", .0.as_str())]
    Locked(SubmissionStatus),

    #[error("An approved score is required when approving")]
    MissingScore,

    #[error("Approved score {score} must be between 0 and {cap}")]
    ScoreOutOfRange { score: Decimal, cap: Decimal },

    #[error("A reason is required when rejecting")]
    MissingRejectReason,
}

impl WorkflowError {
    /// Permission failures, as opposed to invalid state or input.
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::NotReviewer | Self::NotOwner)
    }

    /// The submission is in a status that does not allow the action.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::NotPending(_) | Self::NotReviewed(_) | Self::Locked(_)
        )
    }
}

/// Review fields of a submission after a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewState {
    pub status: SubmissionStatus,
    pub approved_score: Option<Decimal>,
    pub reject_reason: Option<String>,
    pub reviewer_id: Option<Uuid>,
    pub reviewed_at: Option<NaiveDateTime>,
}

/// What happens to the submission's score record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordChange {
    Create(Decimal),
    Delete,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub state: ReviewState,
    pub record: RecordChange,
}

impl Outcome {
    /// Whether the owning student's total has to be recomputed.
    pub fn affects_total(&self) -> bool {
        self.record != RecordChange::Unchanged
    }
}

pub fn apply(
    submission: &Submission,
    actor: &Actor,
    transition: Transition,
    now: NaiveDateTime,
) -> Result<Outcome, WorkflowError> {
    match transition {
        Transition::Approve { score } => {
            ensure_reviewer(actor)?;
            ensure_status(submission, SubmissionStatus::Pending)?;

            let score = score.ok_or(WorkflowError::MissingScore)?;
            let cap = submission.category.cap();
            if score < Decimal::ZERO || score > cap {
                return Err(WorkflowError::ScoreOutOfRange { score, cap });
            }
            let score = score.round_dp(2);

            Ok(Outcome {
                state: ReviewState {
                    status: SubmissionStatus::Approved,
                    approved_score: Some(score),
                    reject_reason: None,
                    reviewer_id: Some(actor.user_id),
                    reviewed_at: Some(now),
                },
                record: RecordChange::Create(score),
            })
        }
        Transition::Reject { reason } => {
            ensure_reviewer(actor)?;
            ensure_status(submission, SubmissionStatus::Pending)?;

            let reason = reason
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .ok_or(WorkflowError::MissingRejectReason)?;

            Ok(Outcome {
                state: ReviewState {
                    status: SubmissionStatus::Rejected,
                    approved_score: None,
                    reject_reason: Some(reason),
                    reviewer_id: Some(actor.user_id),
                    reviewed_at: Some(now),
                },
                record: RecordChange::Unchanged,
            })
        }
        Transition::Revoke => {
            ensure_reviewer(actor)?;
            if !submission.status.is_reviewed() {
                return Err(WorkflowError::NotReviewed(submission.status));
            }

            let record = if submission.status == SubmissionStatus::Approved {
                RecordChange::Delete
            } else {
                RecordChange::Unchanged
            };

            Ok(Outcome {
                state: pending_state(),
                record,
            })
        }
        Transition::Withdraw => {
            if !actor.owns(submission) {
                return Err(WorkflowError::NotOwner);
            }
            ensure_status(submission, SubmissionStatus::Pending)?;

            Ok(Outcome {
                state: ReviewState {
                    status: SubmissionStatus::Revoked,
                    ..pending_state()
                },
                record: RecordChange::Unchanged,
            })
        }
    }
}

/// The owner may change a submission's content while it awaits review.
pub fn ensure_editable(submission: &Submission, actor: &Actor) -> Result<(), WorkflowError> {
    if !actor.owns(submission) {
        return Err(WorkflowError::NotOwner);
    }
    if submission.status != SubmissionStatus::Pending {
        return Err(WorkflowError::Locked(submission.status));
    }
    Ok(())
}

/// The owner may delete a submission that was never reviewed.
pub fn ensure_deletable(submission: &Submission, actor: &Actor) -> Result<(), WorkflowError> {
    if !actor.owns(submission) {
        return Err(WorkflowError::NotOwner);
    }
    match submission.status {
        SubmissionStatus::Pending | SubmissionStatus::Revoked => Ok(()),
        status => Err(WorkflowError::Locked(status)),
    }
}

fn ensure_reviewer(actor: &Actor) -> Result<(), WorkflowError> {
    if actor.role.is_reviewer() {
        Ok(())
    } else {
        Err(WorkflowError::NotReviewer)
    }
}

fn ensure_status(submission: &Submission, expected: SubmissionStatus) -> Result<(), WorkflowError> {
    if submission.status == expected {
        Ok(())
    } else {
        Err(WorkflowError::NotPending(submission.status))
    }
}

fn pending_state() -> ReviewState {
    ReviewState {
        status: SubmissionStatus::Pending,
        approved_score: None,
        reject_reason: None,
        reviewer_id: None,
        reviewed_at: None,
    }
}
