pub mod aggregation;
pub mod profile;
pub mod review;
pub mod scoring;
pub mod workflow;
