//! Session types for the DRL portal.
//!
//! Provides session-token signing/validation, cookie builders, and the
//! `SessionIdentity` extractor.

pub mod cookie;
pub mod identity;
pub mod token;
