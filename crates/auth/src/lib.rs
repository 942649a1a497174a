//! `casting-auth` — bearer-token authentication and permission enforcement.
//!
//! This crate is intentionally decoupled from HTTP and storage: it turns an
//! `Authorization` header value into verified [`Claims`] and decides whether
//! those claims grant a required [`Permission`].

pub mod authorize;
pub mod bearer;
pub mod claims;
pub mod error;
pub mod jwks;
pub mod keys;
pub mod operations;
pub mod permissions;
pub mod roles;
pub mod validator;

#[cfg(test)]
mod test_keys;

pub use authorize::{Allowed, authorize, authorize_all, authorize_operation};
pub use bearer::extract_bearer;
pub use claims::{Claims, ValidatorConfig};
pub use error::AuthError;
pub use jwks::{HttpJwksFetcher, Jwk, Jwks, JwksFetcher, JwksKeyProvider};
pub use keys::{KeyError, KeySet, KeyStore, VerificationKey};
pub use operations::Operation;
pub use permissions::Permission;
pub use roles::Role;
pub use validator::TokenValidator;
