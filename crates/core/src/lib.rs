//! Domain logic shared by the LMS server, storage layer and client.
//!
//! Nothing in here touches the network or the database.

pub mod dates;
pub mod dto;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod scoring;
pub mod stats;
pub mod text;
pub mod types;
pub mod validation;
pub mod youtube;
