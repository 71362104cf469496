//! sea-orm entities for the portal's four tables.

pub mod activities;
pub mod evaluations;
pub mod registrations;
pub mod users;
