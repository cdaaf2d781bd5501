//! Abode Core — Domain models and the store/repository contracts shared
//! by the auth subsystem.

pub mod error;
pub mod models;
pub mod repository;
pub mod store;

pub use error::{AbodeError, AbodeResult};
