use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Submission;
use crate::repository::{score_record, submission, user};
use crate::services::workflow::{self, Actor, RecordChange, Transition};

/// Apply a workflow transition to a submission.
///
/// The submission row, and the owning student's row when the score record
/// changes, are locked for the duration of the transaction. The score record
/// is created or removed alongside the new review state, and the student's
/// total is recomputed before commit.
pub async fn transition(
    pool: &PgPool,
    submission_id: Uuid,
    actor: &Actor,
    transition: Transition,
) -> Result<Submission> {
    let action = transition.name();
    let mut tx = pool.begin().await?;

    let current = submission::lock_for_update(&mut tx, submission_id).await?;
    let outcome = workflow::apply(&current, actor, transition, Utc::now().naive_utc())?;

    // Serializes concurrent transitions of the same student so the total
    // below sees every committed score record.
    if outcome.affects_total() {
        user::lock_for_update(&mut tx, current.student_id).await?;
    }

    let updated = submission::save_review_state(&mut tx, submission_id, &outcome.state).await?;

    match outcome.record {
        RecordChange::Create(score) => {
            score_record::insert(&mut tx, &updated, score).await?;
        }
        RecordChange::Delete => {
            score_record::delete_for_submission(&mut tx, submission_id).await?;
        }
        RecordChange::Unchanged => {}
    }

    if outcome.affects_total() {
        let total = user::refresh_total_score(&mut tx, updated.student_id).await?;
        tracing::debug!(student_id = %updated.student_id, %total, "Total score recomputed");
    }

    tx.commit().await?;

    tracing::info!(
        %submission_id,
        actor_id = %actor.user_id,
        action,
        from = current.status.as_str(),
        to = updated.status.as_str(),
        "Submission transitioned"
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use crate::dto::{submission::CreateSubmissionRequest, user::CreateUserRequest};
    use crate::error::StorageError;
    use crate::models::{
        Achievement, AwardRank, CompetitionLevel, HonorLevel, Role, SubmissionStatus, User,
    };
    use crate::repository::{
        score_record::ScoreRecordRepository, submission::SubmissionRepository,
        user::UserRepository,
    };
    use crate::services::{aggregation, scoring, workflow::WorkflowError};

    async fn create_user(pool: &PgPool, username: &str, role: Role) -> User {
        let req = CreateUserRequest {
            username: username.to_string(),
            role,
            full_name: username.to_string(),
            student_number: (role == Role::Student).then(|| format!("S-{username}")),
            staff_number: None,
            major: None,
            grade: None,
            class_name: None,
            department: None,
            email: None,
            phone: None,
            rank_visible: false,
        };

        UserRepository::new(pool)
            .create(&req, &Uuid::new_v4().simple().to_string())
            .await
            .unwrap()
    }

    async fn submit(pool: &PgPool, student: &User, attributes: Achievement) -> Submission {
        let req = CreateSubmissionRequest {
            attributes,
            description: "Proof of achievement".to_string(),
            proof_url: "/uploads/proof.png".to_string(),
            self_score: Decimal::ONE,
        };

        SubmissionRepository::new(pool)
            .create(student.user_id, &req, scoring::score(&req.attributes))
            .await
            .unwrap()
    }

    fn national_honor() -> Achievement {
        Achievement::Honor {
            level: HonorLevel::National,
        }
    }

    fn competition() -> Achievement {
        Achievement::Competition {
            level: CompetitionLevel::NationalA,
            rank: AwardRank::First,
            is_group: false,
            group_role: None,
        }
    }

    fn approve(score: i64) -> Transition {
        Transition::Approve {
            score: Some(Decimal::from(score)),
        }
    }

    fn actor(user: &User) -> Actor {
        Actor::new(user.user_id, user.role)
    }

    async fn cached_total(pool: &PgPool, student: &User) -> Decimal {
        UserRepository::new(pool)
            .find_by_id(student.user_id)
            .await
            .unwrap()
            .total_score
    }

    async fn records_total(pool: &PgPool, student: &User) -> Decimal {
        let records = ScoreRecordRepository::new(pool)
            .list_for_student(student.user_id)
            .await
            .unwrap();
        aggregation::summarize(&records).total
    }

    #[sqlx::test]
    async fn test_approve_creates_matching_score_record(pool: PgPool) {
        let student = create_user(&pool, "chen.jie", Role::Student).await;
        let teacher = create_user(&pool, "prof.lin", Role::Teacher).await;
        let submission = submit(&pool, &student, national_honor()).await;

        let approved = transition(&pool, submission.submission_id, &actor(&teacher), approve(2))
            .await
            .unwrap();

        assert_eq!(approved.status, SubmissionStatus::Approved);
        assert_eq!(approved.reviewer_id, Some(teacher.user_id));
        assert!(approved.reviewed_at.is_some());

        let record = ScoreRecordRepository::new(&pool)
            .find_for_submission(submission.submission_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(Some(record.score), approved.approved_score);
        assert_eq!(record.student_id, student.user_id);
        assert_eq!(cached_total(&pool, &student).await, Decimal::from(2));
    }

    #[sqlx::test]
    async fn test_revoke_removes_record_and_lowers_total(pool: PgPool) {
        let student = create_user(&pool, "chen.jie", Role::Student).await;
        let admin = create_user(&pool, "admin", Role::Admin).await;
        let honor = submit(&pool, &student, national_honor()).await;
        let award = submit(&pool, &student, competition()).await;

        transition(&pool, honor.submission_id, &actor(&admin), approve(2))
            .await
            .unwrap();
        transition(&pool, award.submission_id, &actor(&admin), approve(5))
            .await
            .unwrap();
        assert_eq!(cached_total(&pool, &student).await, Decimal::from(7));

        let revoked = transition(&pool, award.submission_id, &actor(&admin), Transition::Revoke)
            .await
            .unwrap();

        assert_eq!(revoked.status, SubmissionStatus::Pending);
        assert_eq!(revoked.approved_score, None);
        assert_eq!(revoked.reviewer_id, None);
        assert_eq!(revoked.reviewed_at, None);
        assert!(
            ScoreRecordRepository::new(&pool)
                .find_for_submission(award.submission_id)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(cached_total(&pool, &student).await, Decimal::from(2));
        assert_eq!(records_total(&pool, &student).await, Decimal::from(2));
    }

    #[sqlx::test]
    async fn test_rejected_then_revoked_submission_can_be_approved(pool: PgPool) {
        let student = create_user(&pool, "chen.jie", Role::Student).await;
        let teacher = create_user(&pool, "prof.lin", Role::Teacher).await;
        let submission = submit(&pool, &student, national_honor()).await;
        let id = submission.submission_id;

        let rejected = transition(
            &pool,
            id,
            &actor(&teacher),
            Transition::Reject {
                reason: Some("Certificate is unreadable".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(rejected.status, SubmissionStatus::Rejected);
        assert_eq!(rejected.reject_reason.as_deref(), Some("Certificate is unreadable"));

        let reopened = transition(&pool, id, &actor(&teacher), Transition::Revoke)
            .await
            .unwrap();
        assert_eq!(reopened.status, SubmissionStatus::Pending);
        assert_eq!(reopened.reject_reason, None);

        transition(&pool, id, &actor(&teacher), approve(1))
            .await
            .unwrap();
        assert_eq!(cached_total(&pool, &student).await, Decimal::ONE);
    }

    #[sqlx::test]
    async fn test_withdraw_by_owner_leaves_total_untouched(pool: PgPool) {
        let student = create_user(&pool, "chen.jie", Role::Student).await;
        let submission = submit(&pool, &student, national_honor()).await;

        let withdrawn = transition(
            &pool,
            submission.submission_id,
            &actor(&student),
            Transition::Withdraw,
        )
        .await
        .unwrap();

        assert_eq!(withdrawn.status, SubmissionStatus::Revoked);
        assert_eq!(cached_total(&pool, &student).await, Decimal::ZERO);
    }

    #[sqlx::test]
    async fn test_refused_transition_changes_nothing(pool: PgPool) {
        let student = create_user(&pool, "chen.jie", Role::Student).await;
        let teacher = create_user(&pool, "prof.lin", Role::Teacher).await;
        let submission = submit(&pool, &student, national_honor()).await;

        let err = transition(&pool, submission.submission_id, &actor(&teacher), approve(3))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Workflow(WorkflowError::ScoreOutOfRange { .. })
        ));

        let err = transition(&pool, submission.submission_id, &actor(&student), approve(1))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Workflow(WorkflowError::NotReviewer)));

        let unchanged = SubmissionRepository::new(&pool)
            .find_by_id(submission.submission_id)
            .await
            .unwrap();
        assert_eq!(unchanged.status, SubmissionStatus::Pending);
        assert_eq!(records_total(&pool, &student).await, Decimal::ZERO);
    }

    #[sqlx::test]
    async fn test_concurrent_approvals_keep_total_in_sync(pool: PgPool) {
        let student = create_user(&pool, "chen.jie", Role::Student).await;
        let teacher = create_user(&pool, "prof.lin", Role::Teacher).await;
        let reviewer = actor(&teacher);

        let mut submissions = Vec::new();
        for _ in 0..12 {
            submissions.push(submit(&pool, &student, competition()).await);
        }

        let handles: Vec<_> = submissions
            .iter()
            .map(|submission| {
                let pool = pool.clone();
                let submission_id = submission.submission_id;
                tokio::spawn(async move {
                    transition(&pool, submission_id, &reviewer, approve(1)).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(records_total(&pool, &student).await, Decimal::from(12));
        assert_eq!(cached_total(&pool, &student).await, Decimal::from(12));
    }
}
