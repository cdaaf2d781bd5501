//! Domain models for the Abode auth subsystem.
//!
//! These are the core types shared across all crates.

pub mod fingerprint;
pub mod session;
pub mod user;
