use std::sync::Arc;

use lms_zoom::ZoomClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and everything else sits
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: lms_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// `None` when Zoom credentials are not configured; meeting routes then
    /// answer 503.
    pub zoom: Option<Arc<ZoomClient>>,
}
