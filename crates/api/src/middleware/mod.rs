//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a Bearer token or the session cookie.
//! - [`rbac::RequireAdmin`] -- `admin` only.
//! - [`rbac::RequireStaff`] -- `admin` or `instructor`.
//! - [`rbac::RequireAssessmentManager`] -- staff or `committee_tester`.
//! - [`rbac::RequireAuth`] -- any authenticated user.

pub mod auth;
pub mod rbac;
