//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role; guards every write.
//!
//! Read endpoints take neither and are open to anonymous callers.

pub mod auth;
pub mod rbac;
