mod auth;
mod email;
mod hashing;
mod jwt;
mod mailer;
mod product;
mod upload;
mod user;

pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::email::{DynEmailService, EmailServiceTrait};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::mailer::{DynMailerService, MailerServiceTrait};
pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, ProductCommandRepositoryTrait, ProductCommandServiceTrait,
    ProductQueryRepositoryTrait, ProductQueryServiceTrait,
};
pub use self::upload::{DynUploadService, UploadKind, UploadServiceTrait};
pub use self::user::{
    DynUserCommandRepository, DynUserCommandService, DynUserQueryRepository, DynUserQueryService,
    UserCommandRepositoryTrait, UserCommandServiceTrait, UserQueryRepositoryTrait,
    UserQueryServiceTrait,
};
