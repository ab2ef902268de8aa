pub mod achievement;
pub mod change_log;
pub mod score_clause;
pub mod score_record;
pub mod submission;
pub mod user;

pub use achievement::{
    Achievement, AchievementCategory, AwardRank, CadreRole, CompetitionLevel, ContributorRole,
    HonorLevel, PaperLevel, ScoreGroup,
};
pub use change_log::ProfileChangeLog;
pub use score_clause::ScoreClause;
pub use score_record::ScoreRecord;
pub use submission::{Submission, SubmissionStatus};
pub use user::{Role, User};

/// Raised when a stored text column does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
