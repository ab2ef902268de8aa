pub mod admin;
pub mod clauses;
pub mod ranking;
pub mod reviews;
pub mod scoring;
pub mod stats;
pub mod students;
pub mod submissions;
