//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- access-token signing/validation and refresh-token helpers.
//! - [`cookie`] -- the `lms_session` cookie carrying the access token.

pub mod cookie;
pub mod jwt;
pub mod password;
