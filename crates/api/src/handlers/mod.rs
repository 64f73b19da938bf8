pub mod assessments;
pub mod auth;
pub mod content;
pub mod courses;
pub mod meetings;
pub mod users;

use lms_core::error::CoreError;
use lms_core::types::DbId;
use lms_db::repositories::UserRepo;
use lms_db::DbPool;

use crate::error::AppResult;

/// Resolve a user reference given either as an id or as a display name.
///
/// The id wins when both are present. Unknown references are validation
/// errors naming `field`.
pub(crate) async fn resolve_user_ref(
    pool: &DbPool,
    field: &str,
    id: Option<DbId>,
    name: Option<&str>,
) -> AppResult<Option<DbId>> {
    if let Some(id) = id {
        return match UserRepo::find_by_id(pool, id).await? {
            Some(user) => Ok(Some(user.id)),
            None => Err(CoreError::Validation(format!("{field}: no user with id {id}")).into()),
        };
    }
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    match UserRepo::find_id_by_full_name(pool, name).await? {
        Some(id) => Ok(Some(id)),
        None => Err(CoreError::Validation(format!("{field}: no user named '{name}'")).into()),
    }
}
