//! Abode Auth — Credential verification, token issuance/rotation, and
//! role-gated request authorization.

pub mod config;
pub mod error;
pub mod guard;
pub mod password;
pub mod session;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use guard::{AccessGuard, Identity};
pub use session::{Credentials, LoginOutput, RefreshOutput, SessionManager};
pub use token::TokenClaims;
