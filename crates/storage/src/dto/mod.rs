pub mod clause;
pub mod common;
pub mod ranking;
pub mod scoring;
pub mod stats;
pub mod submission;
pub mod user;
