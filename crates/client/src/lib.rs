//! Typed HTTP client for the LMS API.
//!
//! [`LmsClient`] maps every route to a method. The stores keep a local copy
//! of a resource list in sync with the server, and [`Debouncer`] delays
//! search requests until typing pauses.

pub mod client;
pub mod debounce;
pub mod error;
pub mod store;

pub use client::LmsClient;
pub use debounce::Debouncer;
pub use error::{ClientError, ClientResult};
pub use store::{ContentStore, CourseStore, Store, UserStore};
