//! LMS API server library.
//!
//! Exposes config, state, error handling, auth and the route tree so the
//! binary entrypoint and integration tests build the exact same app.

pub mod auth;
pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
