//! Cross-cutting service plumbing: configuration, tracing, health checks and
//! request-id middleware.

pub mod config;
pub mod health;
pub mod middleware;
pub mod tracing;
