//! Test utilities for DRL services.
//!
//! Provides `MockSession` for signing in as a given account without going
//! through the login form. Import from dev-dependencies only.

pub mod auth;
