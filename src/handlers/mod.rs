pub mod account;
pub mod jobs;
