//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 token verification (and minting for tooling). Tokens are
//!   issued by an external identity service that shares `JWT_SECRET`.

pub mod jwt;
