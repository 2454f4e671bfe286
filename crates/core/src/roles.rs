//! Well-known role name constants carried in the JWT `role` claim.

/// May create, update and delete readings and change thresholds.
pub const ROLE_ADMIN: &str = "admin";

/// Authenticated but read-only.
pub const ROLE_VIEWER: &str = "viewer";
