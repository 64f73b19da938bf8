//! Row models and insert/update DTOs, one module per table.
//!
//! Field names follow the storage columns. The API layer maps them onto the
//! wire types in `lms_core::dto`.

pub mod assessment;
pub mod content;
pub mod course;
pub mod session;
pub mod user;
pub mod youtube_link;
