//! `liquorledger-auth`: roles, caller identity and the user directory.
//!
//! This crate is intentionally decoupled from transport. Callers arrive as an
//! opaque [`PrincipalId`]; the [`UserRegistry`] resolves that to a role and
//! [`authorize`] decides whether the role may perform an [`Action`].

pub mod authorize;
pub mod principal;
pub mod roles;
pub mod user;

pub use authorize::{authorize, Action};
pub use liquorledger_core::PrincipalId;
pub use principal::Principal;
pub use roles::Role;
pub use user::{User, UserPayload, UserRegistry, UserUpdate};
