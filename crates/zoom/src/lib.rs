//! REST client for the Zoom meetings API.
//!
//! Authenticates with server-to-server OAuth (account credentials) and
//! wraps the meeting endpoints the LMS schedules classes through.

pub mod api;
pub mod config;
pub mod meetings;

pub use api::{ZoomClient, ZoomError};
pub use config::ZoomConfig;
