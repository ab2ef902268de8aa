pub mod change_log;
pub mod clause;
pub mod ranking;
pub mod score_record;
pub mod submission;
pub mod user;
