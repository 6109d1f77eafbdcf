mod command;
mod query;

pub use self::command::UserCommandService;
pub use self::query::UserQueryService;

use crate::{
    errors::ServiceError,
    model::{Role, User},
    service::scope_label,
};

/// Accepts the account only when it belongs to the requested role scope.
pub(crate) fn scoped(
    user: Option<User>,
    scope: Option<Role>,
    missing: impl FnOnce() -> String,
) -> Result<User, ServiceError> {
    match user {
        Some(user) if scope.is_none_or(|role| user.role == role) => Ok(user),
        _ => Err(ServiceError::NotFound(missing())),
    }
}

pub(crate) fn not_found_by_id(scope: Option<Role>, id: i32) -> impl FnOnce() -> String {
    move || format!("{} with id {id} not found", scope_label(scope))
}
