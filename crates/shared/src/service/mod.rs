mod auth;
mod mailer;
mod product;
mod upload;
mod user;

pub use self::auth::AuthService;
pub use self::mailer::MailerService;
pub use self::product::{ProductCommandService, ProductQueryService};
pub use self::upload::UploadService;
pub use self::user::{UserCommandService, UserQueryService};

use crate::model::Role;

/// Display label for a role-scoped account controller.
pub(crate) fn scope_label(scope: Option<Role>) -> &'static str {
    match scope {
        None => "User",
        Some(Role::User) => "User",
        Some(Role::Seller) => "Seller",
        Some(Role::Admin) => "Admin",
    }
}
