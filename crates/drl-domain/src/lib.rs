//! Domain types shared across DRL crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod level;
pub mod role;
pub mod score;
