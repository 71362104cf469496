pub mod account;
pub mod activity;
pub mod evaluation;
pub mod registration;
pub mod report;
pub mod seed;
