use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::error::Result;
use crate::models::{ScoreGroup, ScoreRecord};
use crate::repository::user::UserRepository;

/// A student's approved scores, split by group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreTotals {
    pub academic: Decimal,
    pub performance: Decimal,
    pub total: Decimal,
}

pub fn summarize<'a>(records: impl IntoIterator<Item = &'a ScoreRecord>) -> ScoreTotals {
    let mut totals = records
        .into_iter()
        .fold(ScoreTotals::default(), |mut acc, record| {
            match record.score_group {
                ScoreGroup::Academic => acc.academic += record.score,
                ScoreGroup::Performance => acc.performance += record.score,
            }
            acc
        });

    totals.academic = totals.academic.round_dp(2);
    totals.performance = totals.performance.round_dp(2);
    totals.total = totals.academic + totals.performance;
    totals
}

/// Rewrite every student's cached total from their score records.
pub async fn recompute_all_totals(pool: &PgPool) -> Result<u64> {
    let repo = UserRepository::new(pool);
    let count = repo.refresh_all_total_scores().await?;
    tracing::info!(students = count, "Recomputed cached total scores");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use uuid::Uuid;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn record(score_group: ScoreGroup, score: &str) -> ScoreRecord {
        ScoreRecord {
            record_id: Uuid::new_v4(),
            submission_id: Uuid::new_v4(),
            student_id: Uuid::nil(),
            score_group,
            score: dec(score),
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_no_records_sum_to_zero() {
        assert_eq!(summarize(std::iter::empty()), ScoreTotals::default());
    }

    #[test]
    fn test_totals_split_by_group() {
        let records = vec![
            record(ScoreGroup::Academic, "5"),
            record(ScoreGroup::Academic, "1.6"),
            record(ScoreGroup::Performance, "0.9"),
            record(ScoreGroup::Performance, "0.2"),
        ];

        let totals = summarize(&records);

        assert_eq!(totals.academic, dec("6.6"));
        assert_eq!(totals.performance, dec("1.1"));
        assert_eq!(totals.total, dec("7.7"));
    }

    #[test]
    fn test_removed_record_no_longer_counts() {
        let kept = record(ScoreGroup::Academic, "5");
        let revoked = record(ScoreGroup::Performance, "0.6");

        assert_eq!(summarize([&kept, &revoked]).total, dec("5.6"));
        assert_eq!(summarize([&kept]).total, dec("5"));
    }
}
